use crate::tasks::models::{NewTask, Task, TaskId, TaskPatch};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
struct StoreInner {
    tasks: Vec<Task>,
    next_id: TaskId,
}

/// In-memory task collection. Every lookup is scoped to the owning user, and a
/// task owned by someone else is reported exactly like a missing one.
#[derive(Debug)]
pub struct TaskStore {
    inner: RwLock<StoreInner>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                tasks: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub async fn list_by_owner(&self, username: &str) -> Vec<Task> {
        let inner = self.inner.read().await;
        inner
            .tasks
            .iter()
            .filter(|t| t.is_owned_by(username))
            .cloned()
            .collect()
    }

    pub async fn get_by_id_and_owner(&self, id: TaskId, username: &str) -> Option<Task> {
        let inner = self.inner.read().await;
        inner
            .tasks
            .iter()
            .find(|t| t.id == id && t.is_owned_by(username))
            .cloned()
    }

    pub async fn create(&self, new_task: NewTask) -> Task {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let task = Task::new(id, new_task);
        inner.tasks.push(task.clone());
        debug!(task_id = id, owner = %task.user_id, "Task created");
        task
    }

    pub async fn update(&self, id: TaskId, username: &str, patch: TaskPatch) -> Option<Task> {
        let mut inner = self.inner.write().await;
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.is_owned_by(username))?;

        task.apply(patch);
        debug!(task_id = id, "Task updated");
        Some(task.clone())
    }

    pub async fn delete(&self, id: TaskId, username: &str) -> bool {
        let mut inner = self.inner.write().await;
        let position = inner
            .tasks
            .iter()
            .position(|t| t.id == id && t.is_owned_by(username));

        match position {
            Some(index) => {
                inner.tasks.remove(index);
                debug!(task_id = id, "Task deleted");
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.tasks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
