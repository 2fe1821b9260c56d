//! 路由控制器，按资源分组。

pub mod analysis;
pub mod health;
pub mod market;
