//! Built-in records returned whenever the CSV cannot be loaded.

use super::record::BusinessRecord;

/// The fixed three-record demo dataset.
pub fn fallback_businesses() -> Vec<BusinessRecord> {
    vec![
        BusinessRecord {
            id: 1,
            name: "鲜食供应有限公司".to_string(),
            description: "专业供应各类新鲜蔬菜和海鲜，为餐饮行业提供一站式食材解决方案。".to_string(),
            contact: "张经理".to_string(),
            phone: "123-456-7890".to_string(),
            fax: "123-456-7891".to_string(),
            website: "https://example.com".to_string(),
            addresses: "纽约市皇后区".to_string(),
            tags: "供应商,食材,蔬菜,海鲜".to_string(),
            verified: true,
        },
        BusinessRecord {
            id: 2,
            name: "餐厅装修设计工作室".to_string(),
            description: "专注于餐厅空间设计与装修，提供从概念设计到施工的全流程服务。".to_string(),
            contact: "李设计师".to_string(),
            phone: "234-567-8901".to_string(),
            fax: "234-567-8902".to_string(),
            website: "https://design-example.com".to_string(),
            addresses: "洛杉矶市好莱坞区".to_string(),
            tags: "装修,设计,施工".to_string(),
            verified: false,
        },
        BusinessRecord {
            id: 3,
            name: "厨房设备批发中心".to_string(),
            description: "各类专业厨房设备和餐具的批发供应商，提供安装和维修服务。".to_string(),
            contact: "王经理".to_string(),
            phone: "345-678-9012".to_string(),
            fax: "345-678-9013".to_string(),
            website: "https://equipment-example.com".to_string(),
            addresses: "芝加哥市中心区".to_string(),
            tags: "设备,餐具,批发".to_string(),
            verified: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_dense_and_fixed() {
        let records = fallback_businesses();
        let ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[0].name, "鲜食供应有限公司");
        assert_eq!(records[0].addresses, "纽约市皇后区");
        assert!(records[0].verified);
        assert!(!records[1].verified);
        assert_eq!(records, fallback_businesses());
    }
}
