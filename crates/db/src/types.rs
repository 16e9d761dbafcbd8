use meter_core::CategoryConfig;

/// A tracked category as stored for one user, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub position: i64,
    pub title: Option<String>,
    pub config: CategoryConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}
