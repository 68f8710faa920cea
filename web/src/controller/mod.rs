pub(crate) mod fibonacci_controller;
pub(crate) mod health_check_controller;
pub(crate) mod random_controller;
pub(crate) mod stream_controller;
