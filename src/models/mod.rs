pub mod task;
pub mod user;

pub use task::{
    CreateTaskRequest, Paginated, Task, TaskFilter, TaskPriority, TaskStatus, TaskWithAssignee,
    UpdateTaskRequest, UserRef,
};
pub use user::{PublicUser, UpdateUserRequest, User, UserRole};
