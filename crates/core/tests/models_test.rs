use chrono::{NaiveDate, NaiveTime, Utc};
use fake::{
    faker::{internet::en::SafeEmail, name::en::FirstName, name::en::LastName},
    Fake,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use serde_test::{assert_tokens, Token};
use cutandgo_core::errors::ErrorCode;
use cutandgo_core::validation::ScheduleRowConflict;
use cutandgo_core::models::{
    admin::AdminRole,
    appointment::{AppointmentStatus, UpdateAppointmentRequest},
    hairdresser::image_name,
    schedule::{Schedule, ScheduleResponse},
    schedule_row::{CreateScheduleRowRequest, ScheduleRow, ValidateScheduleRowResponse, Weekdays},
    service::{CreateServiceRequest, ServiceIdsQuery},
    user::{CreateUserRequest, User},
};
use uuid::Uuid;

#[test]
fn test_schedule_row_serializes_weekdays_flat() {
    let schedule_id = Uuid::new_v4();
    let row = ScheduleRow::new(
        schedule_id,
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
        Weekdays {
            monday: true,
            wednesday: true,
            friday: true,
            ..Weekdays::NONE
        },
    );

    let value = to_value(&row).expect("Failed to serialize schedule row");

    assert_eq!(
        value,
        json!({
            "schedule_id": schedule_id,
            "start": "09:00:00",
            "end": "13:30:00",
            "monday": true,
            "tuesday": false,
            "wednesday": true,
            "thursday": false,
            "friday": true,
            "saturday": false,
            "sunday": false,
        })
    );
}

#[test]
fn test_create_row_request_defaults_missing_days_to_false() {
    let request: CreateScheduleRowRequest =
        from_str(r#"{"start":"10:00:00","end":"11:00:00","saturday":true}"#)
            .expect("Failed to deserialize row request");

    assert_eq!(
        request.days,
        Weekdays {
            saturday: true,
            ..Weekdays::NONE
        }
    );
}

#[rstest]
#[case(Weekdays::NONE, 0b000_0000)]
#[case(Weekdays::WORKWEEK, 0b001_1111)]
#[case(Weekdays { sunday: true, ..Weekdays::NONE }, 0b100_0000)]
fn test_weekday_bits(#[case] days: Weekdays, #[case] bits: u8) {
    assert_eq!(days.bits(), bits);
    assert_eq!(Weekdays::from_bits(bits), days);
}

#[test]
fn test_weekdays_share_a_day() {
    let weekend = Weekdays {
        saturday: true,
        sunday: true,
        ..Weekdays::NONE
    };
    let friday_saturday = Weekdays {
        friday: true,
        saturday: true,
        ..Weekdays::NONE
    };

    assert!(!Weekdays::WORKWEEK.shares_day_with(&weekend));
    assert!(friday_saturday.shares_day_with(&weekend));
    assert!(friday_saturday.shares_day_with(&Weekdays::WORKWEEK));
    assert!(!Weekdays::NONE.shares_day_with(&Weekdays::WORKWEEK));
    assert!(Weekdays::NONE.is_empty());
}

#[test]
fn test_admin_roles_are_ordered_by_privilege() {
    assert!(AdminRole::Owner < AdminRole::Manager);
    assert!(AdminRole::Manager < AdminRole::Supervisor);
    assert!(AdminRole::Supervisor < AdminRole::Employee);
}

#[rstest]
#[case(AdminRole::Owner, AdminRole::Employee, true)]
#[case(AdminRole::Manager, AdminRole::Manager, true)]
#[case(AdminRole::Employee, AdminRole::Supervisor, false)]
#[case(AdminRole::Supervisor, AdminRole::Owner, false)]
fn test_admin_can_manage(#[case] me: AdminRole, #[case] other: AdminRole, #[case] expected: bool) {
    assert_eq!(me.can_manage(other), expected);
}

#[test]
fn test_admin_role_round_trips_through_storage_value() {
    for role in [
        AdminRole::Owner,
        AdminRole::Manager,
        AdminRole::Supervisor,
        AdminRole::Employee,
    ] {
        assert_eq!(AdminRole::try_from(role.as_i16()).unwrap(), role);
    }
    assert!(AdminRole::try_from(0).is_err());
    assert!(AdminRole::try_from(5).is_err());
}

#[test]
fn test_admin_role_tokens() {
    assert_tokens(
        &AdminRole::Supervisor,
        &[Token::UnitVariant {
            name: "AdminRole",
            variant: "supervisor",
        }],
    );
}

#[test]
fn test_appointment_status_tokens() {
    assert_tokens(
        &AppointmentStatus::Unconfirmed,
        &[Token::UnitVariant {
            name: "AppointmentStatus",
            variant: "unconfirmed",
        }],
    );
    assert!(AppointmentStatus::try_from(7).is_err());
}

#[test]
fn test_update_appointment_status_is_optional() {
    let request: UpdateAppointmentRequest =
        from_str(r#"{"date":"2024-05-02","time":"17:15:00"}"#).expect("Failed to deserialize");

    assert_eq!(request.date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    assert_eq!(request.status, None);
}

#[test]
fn test_user_serialization_hides_credentials() {
    let user = User {
        id: Uuid::new_v4(),
        name: FirstName().fake(),
        last_name: LastName().fake(),
        phone: "600000000".to_string(),
        email: SafeEmail().fake(),
        email_confirmed: false,
        image: String::new(),
        created_at: Utc::now(),
    };

    let value = to_value(&user).expect("Failed to serialize user");
    let object = value.as_object().unwrap();

    assert!(!object.contains_key("password_hash"));
    assert!(!object.contains_key("temp_token"));
    assert_eq!(object["email"], json!(user.email));
}

#[rstest]
#[case("", "someone@example.com", "long-enough", false)]
#[case("Ana", "not-an-email", "long-enough", false)]
#[case("Ana", "ana@example.com", "short", false)]
#[case("Ana", "ana@example.com", "long-enough", true)]
fn test_create_user_request_check(
    #[case] name: &str,
    #[case] email: &str,
    #[case] password: &str,
    #[case] ok: bool,
) {
    let request = CreateUserRequest {
        name: name.to_string(),
        last_name: "García".to_string(),
        phone: "600000000".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        image_extension: None,
    };

    assert_eq!(request.check().is_ok(), ok);
}

#[test]
fn test_service_request_check() {
    let mut request = CreateServiceRequest {
        hairdresser_id: Uuid::new_v4(),
        name: "Corte".to_string(),
        price_cents: 1500,
        duration_minutes: 30,
    };
    assert!(request.check().is_ok());

    request.duration_minutes = 0;
    assert!(request.check().is_err());

    request.duration_minutes = 30;
    request.price_cents = -1;
    assert!(request.check().is_err());
}

#[test]
fn test_service_ids_query_parsing() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    let query = ServiceIdsQuery {
        ids: format!("{}, {},", a, b),
    };
    assert_eq!(query.parse_ids().unwrap(), vec![a, b]);

    let bad = ServiceIdsQuery {
        ids: "not-a-uuid".to_string(),
    };
    assert!(bad.parse_ids().is_err());
}

#[test]
fn test_image_name() {
    let id = Uuid::new_v4();
    assert_eq!(image_name("user", id, Some(".png")), format!("user_{}.png", id));
    assert_eq!(image_name("user", id, Some("")), "");
    assert_eq!(image_name("user", id, Some(".")), "");
    assert_eq!(image_name("user", id, None), "");
}

#[rstest]
#[case(".png")]
#[case("png")]
#[case(" png ")]
fn test_image_name_adds_a_single_dot(#[case] extension: &str) {
    let id = Uuid::new_v4();

    assert_eq!(
        image_name("hairdresser", id, Some(extension)),
        format!("hairdresser_{}.png", id)
    );
}

#[test]
fn test_schedule_response_omits_rows_unless_requested() {
    let schedule = Schedule {
        id: Uuid::new_v4(),
        hairdresser_id: Uuid::new_v4(),
        name: "Summer".to_string(),
        active: true,
        created_at: Utc::now(),
    };

    let value = to_value(ScheduleResponse::from(schedule)).unwrap();
    assert!(value.get("rows").is_none());
}

#[test]
fn test_validate_response_reports_the_refusal() {
    let ok = ValidateScheduleRowResponse::from(Ok::<(), ScheduleRowConflict>(()));
    assert_eq!(to_value(&ok).unwrap(), json!({ "valid": true }));

    let row_id = Uuid::new_v4();
    let refused = ValidateScheduleRowResponse::from(Err::<(), _>(ScheduleRowConflict::OverwriteRange {
        row_id: Some(row_id),
    }));
    assert_eq!(
        refused,
        ValidateScheduleRowResponse {
            valid: false,
            code: Some(ErrorCode::OverwriteRange),
            row_id: Some(row_id),
        }
    );
}
