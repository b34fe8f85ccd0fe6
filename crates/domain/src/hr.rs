//! HR self-service request rules

use crate::dataset::Employee;
use crate::errors::{DomainError, DomainResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestType {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const COMMON: &[RequestType] = &[
    RequestType {
        id: "leave",
        label: "Leave Request",
        description: "Request time off for vacation, personal days, sick leave, etc.",
    },
    RequestType {
        id: "certificate",
        label: "Employment Certificate",
        description: "Request official documentation of your employment status.",
    },
    RequestType {
        id: "id_card",
        label: "ID Card Replacement",
        description: "Request a replacement for your company ID card.",
    },
    RequestType {
        id: "feedback",
        label: "Supervisor Feedback",
        description: "Request formal feedback from your supervisor.",
    },
];

const TECHNICAL: &[RequestType] = &[
    RequestType {
        id: "training",
        label: "Technical Training",
        description: "Request specialized technical training or certifications.",
    },
    RequestType {
        id: "equipment",
        label: "Equipment Request",
        description: "Request new or upgraded technical equipment.",
    },
];

const SALES: &[RequestType] = &[
    RequestType {
        id: "commission",
        label: "Commission Review",
        description: "Request a review of your sales commissions.",
    },
    RequestType {
        id: "client_approval",
        label: "Client Discount Approval",
        description: "Request approval for special client pricing.",
    },
];

const FINANCE: &[RequestType] = &[
    RequestType {
        id: "salary_review",
        label: "Salary Review",
        description: "Request a formal review of your current compensation.",
    },
    RequestType {
        id: "reimbursement",
        label: "Expense Reimbursement",
        description: "Submit expenses for company reimbursement.",
    },
];

const MANAGEMENT: &[RequestType] = &[
    RequestType {
        id: "budget_increase",
        label: "Department Budget Request",
        description: "Request an increase to your department budget.",
    },
    RequestType {
        id: "hiring_request",
        label: "New Position Request",
        description: "Request approval to create a new position.",
    },
];

/// Leave categories offered on the leave form
pub const LEAVE_TYPES: [&str; 5] = [
    "Casual Leave",
    "Sick Leave",
    "Vacation",
    "Personal Leave",
    "Maternity/Paternity",
];

/// Policy text shown when a leave type is picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveGuidance {
    pub description: &'static str,
    pub justification: &'static str,
}

pub fn leave_guidance(leave_type: &str) -> Option<LeaveGuidance> {
    let (description, justification) = match leave_type {
        "Casual Leave" => (
            "Casual leave is a short period of leave for urgent personal matters, family events, or other personal reasons that cannot be planned in advance. Typically used for 1-3 days off.",
            "Please provide the specific reason for your casual leave request. Note that casual leave is limited to 12 days per year as per company policy.",
        ),
        "Sick Leave" => (
            "Sick leave is time taken off work due to personal illness or injury. For leaves longer than 2 consecutive days, a medical certificate is required upon return.",
            "Please describe your health condition briefly. For extended sick leave, mention if you'll be providing a medical certificate.",
        ),
        "Vacation" => (
            "Vacation leave is planned time off for rest, travel, or personal activities. Employees are entitled to 15 working days of vacation leave per year after completing one year of service.",
            "Please provide details about your vacation plans. Note that vacation leaves should be applied at least 2 weeks in advance.",
        ),
        "Personal Leave" => (
            "Personal leave is time off for important life events or personal obligations like moving, attending to family matters, or personal development activities.",
            "Please explain the reason for your personal leave. Personal leaves are limited to 5 days per year as per company policy.",
        ),
        "Maternity/Paternity" => (
            "Maternity leave provides time off for expectant or new mothers. Eligible employees can take up to 26 weeks of maternity leave. Paternity leave provides 2 weeks of leave for new fathers.",
            "Please confirm your expected date of delivery or recent birth date. Include any relevant medical information that supports your leave timing.",
        ),
        _ => return None,
    };
    Some(LeaveGuidance {
        description,
        justification,
    })
}

/// Request types an employee may file, based on department and designation
pub fn available_request_types(employee: &Employee) -> Vec<RequestType> {
    let mut types: Vec<RequestType> = COMMON.to_vec();

    let department_specific = match employee.department.to_lowercase().as_str() {
        "it" => TECHNICAL,
        "sales" => SALES,
        "finance" => FINANCE,
        "management" => MANAGEMENT,
        _ => &[],
    };
    types.extend_from_slice(department_specific);

    let designation = employee.designation.to_lowercase();
    if ["manager", "director", "ceo"]
        .iter()
        .any(|role| designation.contains(role))
    {
        for request in MANAGEMENT {
            if !types.iter().any(|t| t.id == request.id) {
                types.push(*request);
            }
        }
    }

    types
}

pub fn find_request_type(employee: &Employee, id: &str) -> Option<RequestType> {
    available_request_types(employee)
        .into_iter()
        .find(|t| t.id == id)
}

pub fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| DomainError::InvalidDate {
        value: value.to_string(),
    })
}

/// Inclusive day count; reversed ranges count the same as forward ones
pub fn leave_days(from: NaiveDate, to: NaiveDate) -> u32 {
    (to - from).num_days().unsigned_abs() as u32 + 1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveDetails {
    pub leave_type: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

impl LeaveDetails {
    pub fn days(&self) -> u32 {
        leave_days(self.from, self.to)
    }

    /// Block of text embedded into the request prompt
    pub fn describe(&self) -> String {
        let reason = if self.reason.trim().is_empty() {
            "Not provided"
        } else {
            self.reason.trim()
        };
        format!(
            "Leave Type: {}\nStart Date: {}\nEnd Date: {}\nNumber of Days: {}\nReason for Leave: {}",
            self.leave_type,
            self.from,
            self.to,
            self.days(),
            reason
        )
    }
}
