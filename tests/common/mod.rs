#![allow(dead_code)]

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use futures::future::{BoxFuture, FutureExt};
use uuid::Uuid;

use attendance_core::database::models::{
    AttendanceRecord, AttendanceStats, ClockOutPatch, DateRange, OvertimeRequest,
    OvertimeRequestInput, OvertimeStats, OvertimeType, Page, PageQuery, RequestStatus,
    TimeOffRequest, TimeOffRequestInput, TimeOffType, UserId,
};
use attendance_core::error::AppError;
use attendance_core::services::attendance::{AttendanceStore, AttendanceTracker};
use attendance_core::services::clock::Clock;
use attendance_core::services::directory::EmployeeDirectory;
use attendance_core::services::overlap::overlaps;
use attendance_core::services::overtime::OvertimePolicy;
use attendance_core::services::stats::StatsStore;
use attendance_core::services::time_off::TimeOffPolicy;
use attendance_core::services::workflow::{
    Decision, RequestStore, RequestWorkflow, WorkflowRecord,
};

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

pub fn day(y: i32, mo: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, mo, d).unwrap()
}

pub fn range(start: DateTime<Utc>, end: DateTime<Utc>) -> DateRange {
    DateRange::new(start, end)
}

/// Settable clock shared between a test and the services under test.
#[derive(Clone)]
pub struct MutableClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MutableClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for MutableClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Directory stub that records every notification it receives.
#[derive(Clone, Default)]
pub struct RecordingDirectory {
    pub calls: Arc<Mutex<Vec<(UserId, DateTime<Utc>)>>>,
}

impl EmployeeDirectory for RecordingDirectory {
    fn record_clock_in(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> BoxFuture<'_, anyhow::Result<()>> {
        self.calls.lock().unwrap().push((user_id, at));
        future_ok()
    }
}

/// Directory stub that always fails, for the fire-and-forget contract.
#[derive(Clone, Copy, Default)]
pub struct FailingDirectory;

impl EmployeeDirectory for FailingDirectory {
    fn record_clock_in(
        &self,
        _user_id: UserId,
        _at: DateTime<Utc>,
    ) -> BoxFuture<'_, anyhow::Result<()>> {
        async { Err(anyhow::anyhow!("directory unavailable")) }.boxed()
    }
}

fn future_ok() -> BoxFuture<'static, anyhow::Result<()>> {
    async { Ok(()) }.boxed()
}

/// Mutex-guarded stand-in for the attendance table. The map key mirrors the
/// `(user_id, date)` uniqueness constraint and `close` only applies to a
/// still-open record, so the store honors the same atomicity contract as
/// Postgres.
#[derive(Clone, Default)]
pub struct InMemoryAttendanceStore {
    records: Arc<Mutex<HashMap<(UserId, NaiveDate), AttendanceRecord>>>,
}

impl InMemoryAttendanceStore {
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn insert_raw(&self, record: AttendanceRecord) {
        self.records
            .lock()
            .unwrap()
            .insert((record.user_id.clone(), record.date), record);
    }

    pub fn get(&self, user_id: &UserId, date: NaiveDate) -> Option<AttendanceRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&(user_id.clone(), date))
            .cloned()
    }
}

impl AttendanceStore for InMemoryAttendanceStore {
    async fn insert(&self, record: AttendanceRecord) -> Result<AttendanceRecord, AppError> {
        let mut records = self.records.lock().unwrap();
        match records.entry((record.user_id.clone(), record.date)) {
            Entry::Occupied(_) => Err(AppError::DuplicateClockIn),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_for_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, AppError> {
        Ok(self.get(user_id, date))
    }

    async fn close(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        patch: ClockOutPatch,
    ) -> Result<Option<AttendanceRecord>, AppError> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&(user_id.clone(), date)) {
            Some(record) if record.clock_out_time.is_none() => {
                record.clock_out_time = Some(patch.clock_out_time);
                record.is_early_leave = patch.is_early_leave;
                record.total_work_hours =
                    Some((patch.clock_out_time - record.clock_in_time).num_hours() as f64);
                if patch.notes.is_some() {
                    record.notes = patch.notes;
                }
                record.updated_at = patch.clock_out_time;
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn list_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
        page: &PageQuery,
    ) -> Result<Page<AttendanceRecord>, AppError> {
        let records = self.records.lock().unwrap();
        let mut items: Vec<AttendanceRecord> = records
            .values()
            .filter(|r| &r.user_id == user_id && range.contains_day(r.date))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));

        let total_count = items.len() as i64;
        let items = items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Page { items, total_count })
    }
}

/// What the in-memory request store needs beyond `WorkflowRecord`.
pub trait TestRequestRecord: WorkflowRecord + Clone + Send + Sync {
    fn user_id(&self) -> &UserId;
    fn own_range(&self) -> DateRange;
    fn created_at(&self) -> DateTime<Utc>;
    fn apply_decision(&mut self, decision: &Decision);
    fn apply_cancel(&mut self, now: DateTime<Utc>);
}

impl TestRequestRecord for TimeOffRequest {
    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn own_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn apply_decision(&mut self, decision: &Decision) {
        self.status = decision.status;
        self.approved_by = Some(decision.approved_by.clone());
        self.approved_at = Some(decision.approved_at);
        self.rejection_reason = decision.rejection_reason.clone();
        self.updated_at = decision.approved_at;
    }

    fn apply_cancel(&mut self, now: DateTime<Utc>) {
        self.status = RequestStatus::Cancelled;
        self.updated_at = now;
    }
}

impl TestRequestRecord for OvertimeRequest {
    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn own_range(&self) -> DateRange {
        DateRange::new(self.start_time, self.end_time)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn apply_decision(&mut self, decision: &Decision) {
        self.status = decision.status;
        self.approved_by = Some(decision.approved_by.clone());
        self.approved_at = Some(decision.approved_at);
        self.rejection_reason = decision.rejection_reason.clone();
        self.updated_at = decision.approved_at;
    }

    fn apply_cancel(&mut self, now: DateTime<Utc>) {
        self.status = RequestStatus::Cancelled;
        self.updated_at = now;
    }
}

/// Mutex-guarded stand-in for a request table; `decide` and `cancel` only
/// match a still-pending row, mirroring the conditional updates in SQL.
#[derive(Clone)]
pub struct InMemoryRequestStore<R> {
    requests: Arc<Mutex<HashMap<Uuid, R>>>,
}

impl<R> Default for InMemoryRequestStore<R> {
    fn default() -> Self {
        Self {
            requests: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<R: Clone> InMemoryRequestStore<R> {
    pub fn get(&self, id: Uuid) -> Option<R> {
        self.requests.lock().unwrap().get(&id).cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl<R: TestRequestRecord> RequestStore<R> for InMemoryRequestStore<R> {
    async fn insert(&self, record: R) -> Result<R, AppError> {
        self.requests
            .lock()
            .unwrap()
            .insert(record.id(), record.clone());
        Ok(record)
    }

    async fn find(&self, id: Uuid) -> Result<Option<R>, AppError> {
        Ok(self.get(id))
    }

    async fn decide(&self, id: Uuid, decision: Decision) -> Result<Option<R>, AppError> {
        let mut requests = self.requests.lock().unwrap();
        match requests.get_mut(&id) {
            Some(record) if record.status() == RequestStatus::Pending => {
                record.apply_decision(&decision);
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn cancel(
        &self,
        id: Uuid,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<R>, AppError> {
        let mut requests = self.requests.lock().unwrap();
        match requests.get_mut(&id) {
            Some(record)
                if record.status() == RequestStatus::Pending && record.user_id() == user_id =>
            {
                record.apply_cancel(now);
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn list_overlapping(
        &self,
        user_id: &UserId,
        range: &DateRange,
        page: &PageQuery,
    ) -> Result<Page<R>, AppError> {
        let requests = self.requests.lock().unwrap();
        let mut items: Vec<R> = requests
            .values()
            .filter(|r| r.user_id() == user_id && overlaps(&r.own_range(), range))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let total_count = items.len() as i64;
        let items = items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Page { items, total_count })
    }
}

/// Aggregates over the same shared maps the other stores write to.
#[derive(Clone, Default)]
pub struct InMemoryStatsStore {
    pub attendance: InMemoryAttendanceStore,
    pub overtime: InMemoryRequestStore<OvertimeRequest>,
}

impl StatsStore for InMemoryStatsStore {
    async fn attendance_stats(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<AttendanceStats, AppError> {
        let records = self.attendance.records.lock().unwrap();
        let mut stats = AttendanceStats::zero();
        for record in records
            .values()
            .filter(|r| &r.user_id == user_id && range.contains_day(r.date))
        {
            stats.total_days += 1;
            stats.late_days += record.is_late as i64;
            stats.early_leave_days += record.is_early_leave as i64;
            stats.no_clock_out_days += record.is_no_clock_out as i64;
            stats.total_work_hours += record.total_work_hours.unwrap_or(0.0);
            stats.total_overtime_hours += record.total_overtime_hours.unwrap_or(0.0);
        }
        Ok(stats)
    }

    async fn overtime_stats(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<OvertimeStats, AppError> {
        let requests = self.overtime.requests.lock().unwrap();
        let mut stats = OvertimeStats::zero();
        for request in requests
            .values()
            .filter(|r| &r.user_id == user_id && range.contains_day(r.overtime_date))
        {
            stats.total_requests += 1;
            match request.status {
                RequestStatus::Approved => stats.approved_requests += 1,
                RequestStatus::Rejected => stats.rejected_requests += 1,
                RequestStatus::Pending => stats.pending_requests += 1,
                RequestStatus::Cancelled => stats.cancelled_requests += 1,
            }
            stats.total_hours += request.total_hours;
            if let Some(amount) = &request.total_amount {
                stats.total_amount += amount;
            }
        }
        Ok(stats)
    }
}

// Wiring helpers

pub fn tracker(
    clock: &MutableClock,
) -> (
    AttendanceTracker<InMemoryAttendanceStore>,
    InMemoryAttendanceStore,
    RecordingDirectory,
) {
    let store = InMemoryAttendanceStore::default();
    let directory = RecordingDirectory::default();
    let tracker = AttendanceTracker::new(
        store.clone(),
        Arc::new(clock.clone()),
        Arc::new(directory.clone()),
    );
    (tracker, store, directory)
}

pub fn time_off_workflow(
    clock: &MutableClock,
) -> (
    RequestWorkflow<TimeOffPolicy, InMemoryRequestStore<TimeOffRequest>>,
    InMemoryRequestStore<TimeOffRequest>,
) {
    let store = InMemoryRequestStore::default();
    let workflow = RequestWorkflow::new(TimeOffPolicy, store.clone(), Arc::new(clock.clone()));
    (workflow, store)
}

pub fn overtime_workflow(
    clock: &MutableClock,
) -> (
    RequestWorkflow<OvertimePolicy, InMemoryRequestStore<OvertimeRequest>>,
    InMemoryRequestStore<OvertimeRequest>,
) {
    let store = InMemoryRequestStore::default();
    let workflow = RequestWorkflow::new(OvertimePolicy, store.clone(), Arc::new(clock.clone()));
    (workflow, store)
}

// Mock data generators

pub fn time_off_input(user_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> TimeOffRequestInput {
    TimeOffRequestInput {
        user_id: user_id.into(),
        start_date: start,
        end_date: end,
        request_type: TimeOffType::Annual,
        reason: Sentence(3..8).fake(),
        total_hours: None,
        attachment_id: None,
        is_half_day: false,
        half_day_type: None,
    }
}

pub fn overtime_input(
    user_id: &str,
    date: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> OvertimeRequestInput {
    OvertimeRequestInput {
        user_id: user_id.into(),
        overtime_date: date,
        start_time: start,
        end_time: end,
        request_type: OvertimeType::Regular,
        reason: Sentence(3..8).fake(),
        hourly_rate: None,
    }
}

/// A hand-built ledger entry for seeding stats scenarios.
pub fn ledger_entry(
    user_id: &str,
    date: NaiveDate,
    is_late: bool,
    is_early_leave: bool,
    work_hours: Option<f64>,
) -> AttendanceRecord {
    let clock_in = date.and_hms_opt(9, 0, 0).unwrap().and_utc();
    let mut record = AttendanceRecord::open(user_id.into(), clock_in, None);
    record.is_late = is_late;
    record.is_early_leave = is_early_leave;
    record.total_work_hours = work_hours;
    record.clock_out_time = work_hours.map(|h| clock_in + chrono::Duration::hours(h as i64));
    record
}
