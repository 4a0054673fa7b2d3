//! AWS DynamoDB adapter for [`ItemStore`].

use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeValue as SdkValue, PutRequest as SdkPut, WriteRequest as SdkWrite,
};
use aws_sdk_dynamodb::Client;

use crate::aws::load_sdk_config;
use crate::error::PipelineError;
use crate::services::ItemStore;
use crate::types::{AttributeValue, BatchWriteRequest, BatchWriteResponse, WriteRequest};

pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client for `region` (or the default chain when `None`).
    pub async fn from_region(region: Option<&str>, endpoint_url: Option<&str>) -> Self {
        let config = load_sdk_config(region, endpoint_url).await;
        Self::new(Client::new(&config))
    }
}

impl ItemStore for DynamoDbStore {
    /// Unprocessed items are reported back to the caller, never retried.
    async fn batch_write_item(
        &self,
        request: BatchWriteRequest,
    ) -> Result<BatchWriteResponse, PipelineError> {
        let mut request_items = HashMap::new();
        for (table, writes) in request.request_items {
            let writes = writes
                .into_iter()
                .map(to_sdk_write)
                .collect::<Result<Vec<_>, _>>()?;
            request_items.insert(table, writes);
        }

        let output = self
            .client
            .batch_write_item()
            .set_request_items(Some(request_items))
            .send()
            .await
            .map_err(|e| PipelineError::DynamoDb(DisplayErrorContext(&e).to_string()))?;

        let unprocessed_items: BTreeMap<String, Vec<WriteRequest>> = output
            .unprocessed_items()
            .map(|tables| {
                tables
                    .iter()
                    .map(|(table, writes)| {
                        (table.clone(), writes.iter().filter_map(from_sdk_write).collect())
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(BatchWriteResponse { unprocessed_items })
    }
}

fn to_sdk_value(value: AttributeValue) -> SdkValue {
    match value {
        AttributeValue::S(s) => SdkValue::S(s),
        AttributeValue::N(n) => SdkValue::N(n),
    }
}

fn from_sdk_value(value: &SdkValue) -> Option<AttributeValue> {
    match value {
        SdkValue::S(s) => Some(AttributeValue::S(s.clone())),
        SdkValue::N(n) => Some(AttributeValue::N(n.clone())),
        _ => None,
    }
}

fn to_sdk_write(write: WriteRequest) -> Result<SdkWrite, PipelineError> {
    let item: HashMap<String, SdkValue> = write
        .put_request
        .item
        .into_iter()
        .map(|(k, v)| (k, to_sdk_value(v)))
        .collect();
    let put = SdkPut::builder()
        .set_item(Some(item))
        .build()
        .map_err(|e| PipelineError::DynamoDb(e.to_string()))?;
    Ok(SdkWrite::builder().put_request(put).build())
}

/// Only put requests are ever written, so delete requests are skipped.
fn from_sdk_write(write: &SdkWrite) -> Option<WriteRequest> {
    let put = write.put_request()?;
    let item: BTreeMap<String, AttributeValue> = put
        .item()
        .iter()
        .filter_map(|(k, v)| from_sdk_value(v).map(|v| (k.clone(), v)))
        .collect();
    Some(WriteRequest::put(item))
}
