//! Property-based tests for positional ordering
//!
//! After any sequence of creates and moves, positions within each
//! (project, status) partition must stay distinct, and a move must land
//! the task exactly where it was asked to go.

use proptest::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

use milestonenest::models::TaskStatus;
use milestonenest::tasks::{NewTask, TaskFilter, TaskStore};

/// One randomly generated kanban move: which task, where to
#[derive(Debug, Clone)]
struct MoveOp {
    task_index: usize,
    status: TaskStatus,
    position: u32,
}

fn move_op(task_count: usize) -> impl Strategy<Value = MoveOp> {
    (
        0..task_count,
        prop::sample::select(TaskStatus::ALL.to_vec()),
        0..(task_count as u32 + 2),
    )
        .prop_map(|(task_index, status, position)| MoveOp {
            task_index,
            status,
            position,
        })
}

fn new_task(project: Uuid, n: usize) -> NewTask {
    NewTask {
        title: format!("task {n}"),
        description: None,
        status: None,
        priority: None,
        project,
        assignee: None,
        milestone: None,
        due_date: None,
        tags: vec![],
        created_by: Uuid::new_v4(),
    }
}

async fn assert_partitions_distinct(store: &TaskStore, project: Uuid) {
    let tasks = store
        .list(&TaskFilter {
            project: Some(project),
            ..Default::default()
        })
        .await;
    for status in TaskStatus::ALL {
        let positions: Vec<u32> = tasks
            .iter()
            .filter(|t| t.status == status)
            .map(|t| t.position)
            .collect();
        let distinct: HashSet<u32> = positions.iter().copied().collect();
        assert_eq!(
            distinct.len(),
            positions.len(),
            "duplicate positions in {status:?}: {positions:?}"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn positions_stay_distinct_under_moves(
        task_count in 1usize..8,
        moves in prop::collection::vec(move_op(8), 0..24),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        rt.block_on(async {
            let store = TaskStore::new();
            let project = Uuid::new_v4();

            let mut ids = Vec::new();
            for n in 0..task_count {
                let task = store.create(new_task(project, n)).await;
                ids.push(task.id);
            }

            for op in &moves {
                let id = ids[op.task_index % task_count];
                let moved = store.move_task(id, op.status, op.position).await;
                prop_assert!(moved.is_some());
                let moved = moved.unwrap();
                prop_assert_eq!(moved.status, op.status);
                prop_assert_eq!(moved.position, op.position);
                assert_partitions_distinct(&store, project).await;
            }
            Ok(())
        })?;
    }

    #[test]
    fn creates_take_successive_tail_positions(task_count in 1usize..16) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        rt.block_on(async {
            let store = TaskStore::new();
            let project = Uuid::new_v4();

            for n in 0..task_count {
                let task = store.create(new_task(project, n)).await;
                prop_assert_eq!(task.position, n as u32);
            }
            Ok(())
        })?;
    }
}
