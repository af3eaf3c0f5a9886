// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod csv_preview;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_preview::{
    CsvImportError, CsvPreviewResult, CsvRowResult, CsvRowStatus, preview_meter_csv,
};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    amend_technicians, approve_work_order, create_tariff_group, create_work_order,
    delete_tariff_group, generate_bills, get_audit_event, get_audit_timeline,
    list_bill_status_history, list_bills_for_period, list_meters, list_tariff_groups,
    list_work_orders, record_late_penalty, register_meter, set_meter_active,
    transition_work_order, update_bill_status, update_tariff_group,
};
pub use request_response::{
    AmendTechniciansRequest, ApproveWorkOrderRequest, AuditEventInfo, BillInfo,
    BillStatusHistoryInfo, CreateWorkOrderRequest, GenerateBillsRequest, GenerateBillsResponse,
    GenerationFailureInfo, MeterInfo, RecordPenaltyRequest, RegisterMeterRequest,
    TariffGroupInfo, TariffGroupRequest, TransitionWorkOrderRequest, UpdateBillStatusRequest,
    WorkOrderInfo,
};
