//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `grouper_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use grouper_core::model::EntityKind;
use grouper_core::storage::StoreError;

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StoreError {
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            StoreError::Unavailable(format!("GetItem failed: {:?}", err))
        }
        err => match err.into_service_error() {
            GetItemError::ResourceNotFoundException(_) => {
                StoreError::Unavailable("Table not found".to_string())
            }
            GetItemError::ProvisionedThroughputExceededException(_) => {
                StoreError::Backend("Throughput exceeded, please retry".to_string())
            }
            GetItemError::RequestLimitExceeded(_) => {
                StoreError::Backend("Request limit exceeded, please retry".to_string())
            }
            GetItemError::InternalServerError(_) => {
                StoreError::Backend("DynamoDB internal server error".to_string())
            }
            err => StoreError::Backend(format!("GetItem failed: {:?}", err)),
        },
    }
}

/// Map a conditional PutItem SDK error to StoreError.
///
/// A failed condition means the record already exists on insert and is
/// missing on overwrite; `condition_failure` supplies the matching error.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    condition_failure: StoreError,
) -> StoreError {
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            StoreError::Unavailable(format!("PutItem failed: {:?}", err))
        }
        err => match err.into_service_error() {
            PutItemError::ConditionalCheckFailedException(_) => condition_failure,
            PutItemError::ResourceNotFoundException(_) => {
                StoreError::Unavailable("Table not found".to_string())
            }
            PutItemError::ProvisionedThroughputExceededException(_) => {
                StoreError::Backend("Throughput exceeded, please retry".to_string())
            }
            PutItemError::RequestLimitExceeded(_) => {
                StoreError::Backend("Request limit exceeded, please retry".to_string())
            }
            PutItemError::ItemCollectionSizeLimitExceededException(_) => {
                StoreError::Backend("Item collection size limit exceeded".to_string())
            }
            PutItemError::TransactionConflictException(_) => {
                StoreError::Backend("Transaction conflict, please retry".to_string())
            }
            PutItemError::InternalServerError(_) => {
                StoreError::Backend("DynamoDB internal server error".to_string())
            }
            err => StoreError::Backend(format!("PutItem failed: {:?}", err)),
        },
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    kind: EntityKind,
    id: impl Into<String>,
) -> StoreError {
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            StoreError::Unavailable(format!("DeleteItem failed: {:?}", err))
        }
        err => match err.into_service_error() {
            DeleteItemError::ConditionalCheckFailedException(_) => StoreError::NotFound {
                kind,
                id: id.into(),
            },
            DeleteItemError::ResourceNotFoundException(_) => {
                StoreError::Unavailable("Table not found".to_string())
            }
            DeleteItemError::ProvisionedThroughputExceededException(_) => {
                StoreError::Backend("Throughput exceeded, please retry".to_string())
            }
            DeleteItemError::RequestLimitExceeded(_) => {
                StoreError::Backend("Request limit exceeded, please retry".to_string())
            }
            DeleteItemError::TransactionConflictException(_) => {
                StoreError::Backend("Transaction conflict, please retry".to_string())
            }
            DeleteItemError::InternalServerError(_) => {
                StoreError::Backend("DynamoDB internal server error".to_string())
            }
            err => StoreError::Backend(format!("DeleteItem failed: {:?}", err)),
        },
    }
}
