//! Task definitions and the rule-driven task container

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaCompileOptions {
    pub source_compatibility: Option<String>,
    pub target_compatibility: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KotlinCompileOptions {
    pub jvm_target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    JavaCompile(JavaCompileOptions),
    KotlinCompile(KotlinCompileOptions),
    Delete { targets: Vec<PathBuf> },
    Other,
}

impl TaskKind {
    pub fn java_compile() -> Self {
        TaskKind::JavaCompile(JavaCompileOptions::default())
    }

    pub fn kotlin_compile() -> Self {
        TaskKind::KotlinCompile(KotlinCompileOptions::default())
    }

    pub fn task_type(&self) -> TaskType {
        match self {
            TaskKind::JavaCompile(_) => TaskType::JavaCompile,
            TaskKind::KotlinCompile(_) => TaskType::KotlinCompile,
            TaskKind::Delete { .. } => TaskType::Delete,
            TaskKind::Other => TaskType::Other,
        }
    }
}

/// Discriminant used to select tasks for a configuration rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    JavaCompile,
    KotlinCompile,
    Delete,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    kind: TaskKind,
}

impl Task {
    pub fn new(name: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut TaskKind {
        &mut self.kind
    }

    pub fn task_type(&self) -> TaskType {
        self.kind.task_type()
    }
}

pub type TaskRule = Box<dyn Fn(&mut Task)>;

/// Tasks of one module. Rules added with [`TaskContainer::configure_each`]
/// are standing policies: they run against every matching task that exists
/// now and every matching task registered later, in rule order.
#[derive(Default)]
pub struct TaskContainer {
    tasks: Vec<Task>,
    rules: Vec<(TaskType, TaskRule)>,
}

impl TaskContainer {
    /// Registers `task` and runs matching rules on it. Returns false and
    /// leaves the container unchanged if the name is taken.
    pub fn register(&mut self, mut task: Task) -> bool {
        if self.get(task.name()).is_some() {
            return false;
        }

        for (task_type, rule) in &self.rules {
            if *task_type == task.task_type() {
                rule(&mut task);
            }
        }
        self.tasks.push(task);
        true
    }

    pub fn configure_each(&mut self, task_type: TaskType, rule: impl Fn(&mut Task) + 'static) {
        for task in self.tasks.iter_mut().filter(|t| t.task_type() == task_type) {
            rule(task);
        }
        self.rules.push((task_type, Box::new(rule)));
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn of_type(&self, task_type: TaskType) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.task_type() == task_type)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl fmt::Debug for TaskContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskContainer")
            .field("tasks", &self.tasks)
            .field("rules", &self.rules.len())
            .finish()
    }
}
