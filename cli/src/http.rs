use serde::de::DeserializeOwned;
use taskboard_core::{ApiFailure, ApiResponse, NewTask, Status, StatusUpdate, Task, TaskApi};
use uuid::Uuid;

/// Client for the task board JSON API.
pub struct HttpTaskApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, id: &Uuid) -> String {
        format!("{}/api/tasks/{}", self.base_url, id)
    }
}

/// Error statuses still carry an envelope, so they are decoded like
/// successes. A transport failure or an unreadable body has no message.
fn read_envelope<T: DeserializeOwned>(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<T, ApiFailure> {
    match result {
        Ok(response) => decode_envelope(response),
        Err(ureq::Error::Status(_, response)) => decode_envelope(response),
        Err(_) => Err(ApiFailure::default()),
    }
}

fn decode_envelope<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ApiFailure> {
    let envelope: ApiResponse<T> = response.into_json().map_err(|_| ApiFailure::default())?;
    envelope.into_result()
}

impl TaskApi for HttpTaskApi {
    fn list(&self) -> Result<Vec<Task>, ApiFailure> {
        read_envelope(self.agent.get(&self.tasks_url()).call())
    }

    fn create(&self, input: &NewTask) -> Result<Task, ApiFailure> {
        read_envelope(self.agent.post(&self.tasks_url()).send_json(input))
    }

    fn update_status(&self, id: &Uuid, status: Status) -> Result<Task, ApiFailure> {
        let body = StatusUpdate {
            status: Some(status.as_str().to_string()),
        };
        read_envelope(self.agent.put(&self.task_url(id)).send_json(body))
    }

    fn delete(&self, id: &Uuid) -> Result<Task, ApiFailure> {
        read_envelope(self.agent.delete(&self.task_url(id)).call())
    }
}
