// src/core/tasks.rs — Daily wellness checklist

use serde::Serialize;

use crate::infra::errors::CompanionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub name: String,
    pub done: bool,
}

/// Fixed set of task names with a completion flag each. Insertion order is kept
/// for display.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tasks: Vec<Task> = Vec::new();
        for name in names {
            let name = name.into();
            if !tasks.iter().any(|t| t.name == name) {
                tasks.push(Task { name, done: false });
            }
        }
        Self { tasks }
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Task, CompanionError> {
        self.tasks
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| CompanionError::UnknownTask {
                name: name.to_string(),
            })
    }

    /// Flip one task and return its new state.
    pub fn toggle(&mut self, name: &str) -> Result<bool, CompanionError> {
        let task = self.find_mut(name)?;
        task.done = !task.done;
        Ok(task.done)
    }

    pub fn is_done(&self, name: &str) -> Option<bool> {
        self.tasks.iter().find(|t| t.name == name).map(|t| t.done)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// (completed, total)
    pub fn progress(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.done).count();
        (done, self.tasks.len())
    }
}
