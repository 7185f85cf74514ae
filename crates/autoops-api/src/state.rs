use autoops_executor::TaskRunner;

#[derive(Clone)]
pub struct ApiState {
    pub runner: TaskRunner,
}
