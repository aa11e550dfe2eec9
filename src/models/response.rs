//! MES 响应数据模型

use serde_json::{Map, Value};

/// MES 查询成功后的结构化结果
///
/// 只有 HTTP 200 且业务 success == true 的响应才会变成本类型；
/// 原始响应文本一并保留，供原始 JSON 落盘失败时回退使用。
#[derive(Debug, Clone)]
pub struct MesRecord {
    /// HTTP 状态码
    pub status: u16,
    /// 解析后的响应体
    pub body: Value,
    /// 原始响应文本
    pub raw_text: String,
}

impl MesRecord {
    /// 提取 data 字段下的键值映射
    ///
    /// data 缺失或不是对象时视为空映射，模板合并照常进行。
    pub fn data_map(&self) -> Map<String, Value> {
        self.body
            .get("data")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    /// 提取业务侧附带的 message 字段
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// 将 JSON 值转为模板填充用的字符串
///
/// 字符串不带引号，数字与布尔值按 JSON 字面形式，null 输出 "null"，
/// 嵌套结构输出紧凑 JSON。
pub fn value_to_display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(body: Value) -> MesRecord {
        let raw_text = body.to_string();
        MesRecord {
            status: 200,
            body,
            raw_text,
        }
    }

    #[test]
    fn data_map_extracts_object_in_document_order() {
        let record = record(json!({
            "success": true,
            "data": {"LINE": "L1", "MODEL": "X1", "DATE": "2024-01-01"}
        }));

        let data = record.data_map();
        let keys: Vec<&String> = data.keys().collect();
        assert_eq!(keys, ["LINE", "MODEL", "DATE"]);
    }

    #[test]
    fn data_map_treats_missing_or_non_object_data_as_empty() {
        assert!(record(json!({"success": true})).data_map().is_empty());
        assert!(record(json!({"success": true, "data": [1, 2]}))
            .data_map()
            .is_empty());
        assert!(record(json!({"success": true, "data": "oops"}))
            .data_map()
            .is_empty());
    }

    #[test]
    fn values_are_stringified_without_json_quoting() {
        assert_eq!(value_to_display_string(&json!("L1")), "L1");
        assert_eq!(value_to_display_string(&json!(42)), "42");
        assert_eq!(value_to_display_string(&json!(2.5)), "2.5");
        assert_eq!(value_to_display_string(&json!(true)), "true");
        assert_eq!(value_to_display_string(&json!(null)), "null");
        assert_eq!(
            value_to_display_string(&json!({"a": 1})),
            r#"{"a":1}"#
        );
    }
}
