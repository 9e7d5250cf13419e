//! 写入前校验
//!
//! Postgres 与内存实现共用，保证两种后端对同一输入给出同样的结果：
//! - ensure_required：必填文本去空白后非空
//! - ensure_non_negative：金额等数值不能为负

use crate::error::StorageError;

/// 必填文本去空白后非空
pub fn ensure_required(field: &str, value: &str) -> Result<(), StorageError> {
    if value.trim().is_empty() {
        return Err(StorageError::invalid_input(format!("{field} required")));
    }
    Ok(())
}

/// 数值不能为负
pub fn ensure_non_negative(field: &str, value: Option<f64>) -> Result<(), StorageError> {
    match value {
        Some(value) if value.is_nan() || value < 0.0 => Err(StorageError::invalid_input(format!(
            "{field} must be non-negative"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageErrorKind;

    #[test]
    fn blank_required_field_is_invalid() {
        let err = ensure_required("name", "   ").expect_err("blank");
        assert_eq!(err.kind(), StorageErrorKind::InvalidInput);
        assert_eq!(err.message(), "name required");
        assert!(ensure_required("name", "Laptop").is_ok());
    }

    #[test]
    fn negative_cost_is_invalid() {
        assert!(ensure_non_negative("purchaseCost", Some(-1.0)).is_err());
        assert!(ensure_non_negative("purchaseCost", Some(0.0)).is_ok());
        assert!(ensure_non_negative("purchaseCost", None).is_ok());
    }
}
