use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentService {
    pub appointment_id: Uuid,
    pub service_id: Uuid,
}
