//! 咖啡馆记录服务

pub mod handler;
pub mod model;
pub mod service;
