use chrono::{DateTime, Utc};

use super::BindValue;

// Each helper returns the 1-based placeholder index of the value it pushed.

pub(crate) fn push_bool(bind_params: &mut Vec<BindValue>, value: bool) -> usize {
    bind_params.push(BindValue::Bool(value));
    bind_params.len()
}

pub(crate) fn push_text(bind_params: &mut Vec<BindValue>, value: String) -> usize {
    bind_params.push(BindValue::Text(value));
    bind_params.len()
}

pub(crate) fn push_text_array(bind_params: &mut Vec<BindValue>, value: Vec<String>) -> usize {
    bind_params.push(BindValue::TextArray(value));
    bind_params.len()
}

pub(crate) fn push_timestamp(bind_params: &mut Vec<BindValue>, value: DateTime<Utc>) -> usize {
    bind_params.push(BindValue::Timestamp(value));
    bind_params.len()
}

pub(crate) fn push_bigint(bind_params: &mut Vec<BindValue>, value: i64) -> usize {
    bind_params.push(BindValue::BigInt(value));
    bind_params.len()
}
