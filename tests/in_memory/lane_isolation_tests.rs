//! Lane isolation across mixed operations through the task service.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use todolane::todo::{
    adapters::memory::InMemoryTodoRepository,
    domain::{LaneKey, TodoId},
    services::{ChangePositionRequest, TodoRequest, TodoService},
};

type TestService = TodoService<InMemoryTodoRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TodoService::new(
        Arc::new(InMemoryTodoRepository::new()),
        Arc::new(DefaultClock),
    )
}

async fn lane_snapshot(service: &TestService, lane: &str) -> HashMap<TodoId, i64> {
    service
        .list_lane(&LaneKey::new(lane))
        .await
        .expect("lane listing should succeed")
        .iter()
        .map(|todo| (todo.id(), todo.position().value()))
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operations_in_one_lane_never_touch_another(service: TestService) {
    let mut todo_ids = Vec::new();
    for title in ["A", "B", "C", "D"] {
        let created = service
            .create(TodoRequest::new(title, "", "1", "todo"))
            .await
            .expect("creation should succeed");
        todo_ids.push(created.id());
    }
    for title in ["X", "Y"] {
        service
            .create(TodoRequest::new(title, "", "2", "done"))
            .await
            .expect("creation should succeed");
    }
    let done_before = lane_snapshot(&service, "done").await;

    for (index, id) in todo_ids.iter().enumerate() {
        service
            .change_position(ChangePositionRequest::new(*id, (index + 1).to_string()))
            .await
            .expect("move should succeed");
    }
    if let Some(last) = todo_ids.last() {
        service.remove(*last).await.expect("removal should succeed");
    }
    service
        .create(TodoRequest::new("E", "", "1", "todo"))
        .await
        .expect("creation should succeed");

    assert_eq!(lane_snapshot(&service, "done").await, done_before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_work_in_separate_lanes_stays_sequential(service: TestService) {
    let lanes = ["todo", "doing", "done"];
    let mut handles = Vec::new();
    for lane in lanes {
        for index in 0..10 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .create(TodoRequest::new(format!("{lane}-{index}"), "", "1", lane))
                    .await
            }));
        }
    }
    for handle in handles {
        handle
            .await
            .expect("task should not panic")
            .expect("creation should succeed");
    }

    for lane in lanes {
        let mut positions: Vec<i64> = lane_snapshot(&service, lane).await.into_values().collect();
        positions.sort_unstable();
        assert_eq!(positions, (1..=10).collect::<Vec<_>>(), "lane {lane}");
    }
}
