mod health_check;
mod subscription_form;

pub use health_check::*;
pub use subscription_form::*;
