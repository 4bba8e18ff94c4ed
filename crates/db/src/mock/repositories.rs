use chrono::NaiveTime;
use cutandgo_core::errors::BookingResult;
use cutandgo_core::models::admin::AdminRole;
use cutandgo_core::models::schedule_row::Weekdays;
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbAdmin, DbSchedule, DbScheduleRow, DbUser};

// Mock repositories for testing
mock! {
    pub ScheduleRowRepo {
        pub async fn get_schedule_row_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbScheduleRow>>;

        pub async fn get_schedule_rows_by_schedule_id(
            &self,
            schedule_id: Uuid,
        ) -> eyre::Result<Vec<DbScheduleRow>>;

        pub async fn create_schedule_row(
            &self,
            schedule_id: Uuid,
            start: NaiveTime,
            end: NaiveTime,
            days: Weekdays,
        ) -> BookingResult<DbScheduleRow>;

        pub async fn update_schedule_row(
            &self,
            id: Uuid,
            start: NaiveTime,
            end: NaiveTime,
            days: Weekdays,
        ) -> BookingResult<DbScheduleRow>;

        pub async fn delete_schedule_row(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub ScheduleRepo {
        pub async fn get_schedule_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSchedule>>;

        pub async fn get_active_schedule(
            &self,
            hairdresser_id: Uuid,
        ) -> eyre::Result<Option<DbSchedule>>;

        pub async fn create_schedule(
            &self,
            hairdresser_id: Uuid,
            name: &'static str,
            active: bool,
        ) -> BookingResult<DbSchedule>;

        pub async fn delete_schedule(
            &self,
            id: Uuid,
        ) -> BookingResult<()>;
    }
}

mock! {
    pub AdminRepo {
        pub async fn get_admin(
            &self,
            hairdresser_id: Uuid,
            user_id: Uuid,
        ) -> eyre::Result<Option<DbAdmin>>;

        pub async fn create_admin(
            &self,
            hairdresser_id: Uuid,
            user_id: Uuid,
            role: AdminRole,
        ) -> BookingResult<DbAdmin>;
    }
}

mock! {
    pub UserRepo {
        pub async fn get_user_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn verify_credentials(
            &self,
            email: &'static str,
            password: &'static str,
        ) -> BookingResult<DbUser>;
    }
}
