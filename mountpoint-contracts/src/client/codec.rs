// SPDX-License-Identifier: GPL-3.0-only

//! `a{sv}` encoding of partition requests
//!
//! The storage module exchanges requests as string-keyed variant maps. Only the
//! four keys the editor owns are written; other keys the backend may report
//! (mount or format options) are ignored when reading.

use std::collections::HashMap;

use mountpoint_types::PartitionRequest;
use zbus::zvariant::{OwnedValue, Value};

use super::error::ClientError;

pub const DEVICE_SPEC: &str = "device-spec";
pub const FORMAT_TYPE: &str = "format-type";
pub const MOUNT_POINT: &str = "mount-point";
pub const REFORMAT: &str = "reformat";

pub type RequestStruct = HashMap<String, OwnedValue>;

pub fn encode_request(request: &PartitionRequest) -> Result<RequestStruct, ClientError> {
    let mut map = HashMap::with_capacity(4);
    map.insert(
        DEVICE_SPEC.to_string(),
        OwnedValue::try_from(Value::from(request.device_spec.as_str()))?,
    );
    map.insert(
        FORMAT_TYPE.to_string(),
        OwnedValue::try_from(Value::from(request.format_type.as_str()))?,
    );
    map.insert(
        MOUNT_POINT.to_string(),
        OwnedValue::try_from(Value::from(request.mount_point.as_str()))?,
    );
    map.insert(
        REFORMAT.to_string(),
        OwnedValue::try_from(Value::from(request.reformat))?,
    );
    Ok(map)
}

pub fn encode_requests(requests: &[PartitionRequest]) -> Result<Vec<RequestStruct>, ClientError> {
    requests.iter().map(encode_request).collect()
}

pub fn decode_request(map: RequestStruct) -> Result<PartitionRequest, ClientError> {
    let mut request = PartitionRequest::default();
    let mut has_device = false;

    for (key, value) in map {
        match key.as_str() {
            DEVICE_SPEC => {
                request.device_spec = string_field(&key, value)?;
                has_device = true;
            }
            FORMAT_TYPE => request.format_type = string_field(&key, value)?,
            MOUNT_POINT => request.mount_point = string_field(&key, value)?,
            REFORMAT => {
                request.reformat = bool::try_from(value).map_err(|e| {
                    ClientError::ParseError(format!("'{REFORMAT}' is not a boolean: {e}"))
                })?
            }
            _ => {}
        }
    }

    if !has_device {
        return Err(ClientError::ParseError(format!(
            "request without '{DEVICE_SPEC}'"
        )));
    }

    Ok(request)
}

pub fn decode_requests(maps: Vec<RequestStruct>) -> Result<Vec<PartitionRequest>, ClientError> {
    maps.into_iter().map(decode_request).collect()
}

fn string_field(key: &str, value: OwnedValue) -> Result<String, ClientError> {
    String::try_from(value)
        .map_err(|e| ClientError::ParseError(format!("'{key}' is not a string: {e}")))
}
