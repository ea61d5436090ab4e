use serde::{Deserialize, Serialize};

use crate::view::session::ApiFailure;

/// Body of a create request. Fields are optional so a missing one becomes a
/// validation error rather than a decode failure.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            due_date: Some(due_date.into()),
        }
    }
}

/// Body of a status update request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
}

/// Envelope wrapped around every API response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Collapses the envelope for a client: only `success` and `message`
    /// are looked at.
    pub fn into_result(self) -> Result<T, ApiFailure> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(ApiFailure::new(self.message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Status, Task};

    #[test]
    fn envelope_omits_absent_fields() {
        let body = serde_json::to_value(ApiResponse::<()>::failure("Task not found")).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "message": "Task not found"}));
    }

    #[test]
    fn into_result_keeps_server_message() {
        let failed: ApiResponse<u32> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(failed.into_result().unwrap_err().message, None);

        let failed: ApiResponse<u32> =
            serde_json::from_str(r#"{"success": false, "message": "Due date is required"}"#).unwrap();
        assert_eq!(
            failed.into_result().unwrap_err().message.as_deref(),
            Some("Due date is required")
        );

        assert_eq!(ApiResponse::ok(7).into_result().unwrap(), 7);
    }

    #[test]
    fn decodes_task_envelopes() {
        let raw = r#"{
            "success": true,
            "data": {
                "id": "6f1c3b1e-8d2a-4c1e-9f3b-2a7d5e4c1b00",
                "title": "Buy milk",
                "dueDate": "2025-01-20",
                "status": "pending",
                "createdAt": "2025-01-15T09:00:00Z",
                "updatedAt": "2025-01-15T09:00:00Z"
            },
            "message": "Task created successfully"
        }"#;
        let created: ApiResponse<Task> = serde_json::from_str(raw).unwrap();
        let task = created.into_result().unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, Status::Pending);

        let missing: ApiResponse<Task> =
            serde_json::from_str(r#"{"success": false, "message": "Task not found"}"#).unwrap();
        assert!(missing.data.is_none());
        assert_eq!(missing.into_result().unwrap_err().message.as_deref(), Some("Task not found"));
    }

    #[test]
    fn new_task_tolerates_missing_fields() {
        let body: NewTask = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert_eq!(body.due_date, None);

        let body: NewTask = serde_json::from_str(r#"{"dueDate": "2025-01-10"}"#).unwrap();
        assert_eq!(body.title, None);
        assert_eq!(body.due_date.as_deref(), Some("2025-01-10"));
    }
}
