//! Option DTOs returned by the context endpoints.
//!
//! Lists are kept in the order the backend returns them. Fields the front-end
//! does not model are preserved in `extra` so nothing is lost on a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::{ClassId, CollegeId, SectionId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeOption {
    pub id: CollegeId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassOption {
    pub id: ClassId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<CollegeId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOption {
    pub id: SectionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<ClassId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Common view over the three option types, used by the selectors.
pub trait ContextOption {
    type Id: Copy + Eq + std::fmt::Display;

    fn id(&self) -> Self::Id;
    fn name(&self) -> &str;
}

macro_rules! impl_context_option {
    ($ty:ty, $id:ty) => {
        impl ContextOption for $ty {
            type Id = $id;

            fn id(&self) -> $id {
                self.id
            }

            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

impl_context_option!(CollegeOption, CollegeId);
impl_context_option!(ClassOption, ClassId);
impl_context_option!(SectionOption, SectionId);

impl CollegeOption {
    pub fn new(id: impl Into<CollegeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

impl ClassOption {
    pub fn new(id: impl Into<ClassId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            college_id: None,
            extra: Map::new(),
        }
    }

    pub fn in_college(mut self, college_id: impl Into<CollegeId>) -> Self {
        self.college_id = Some(college_id.into());
        self
    }
}

impl SectionOption {
    pub fn new(id: impl Into<SectionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class_id: None,
            extra: Map::new(),
        }
    }

    pub fn in_class(mut self, class_id: impl Into<ClassId>) -> Self {
        self.class_id = Some(class_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_are_preserved() {
        let json = r#"{"id": 4, "name": "Science", "code": "SCI", "capacity": 40}"#;
        let option: CollegeOption = serde_json::from_str(json).unwrap();
        assert_eq!(option.id, CollegeId::new(4));
        assert_eq!(option.extra.get("code"), Some(&Value::from("SCI")));

        let back = serde_json::to_value(&option).unwrap();
        assert_eq!(back["capacity"], 40);
    }

    #[test]
    fn test_list_order_is_kept() {
        let json = r#"[{"id": 9, "name": "Z"}, {"id": 1, "name": "A"}, {"id": 5, "name": "M"}]"#;
        let list: Vec<ClassOption> = serde_json::from_str(json).unwrap();
        let ids: Vec<i64> = list.iter().map(|c| c.id.into_inner()).collect();
        assert_eq!(ids, vec![9, 1, 5]);
    }

    #[test]
    fn test_parent_ids_are_optional() {
        let section: SectionOption = serde_json::from_str(r#"{"id": 2, "name": "B"}"#).unwrap();
        assert_eq!(section.class_id, None);

        let section: SectionOption =
            serde_json::from_str(r#"{"id": 2, "name": "B", "class_id": 7}"#).unwrap();
        assert_eq!(section.class_id, Some(ClassId::new(7)));
    }

    #[test]
    fn test_context_option_trait() {
        let class = ClassOption::new(7, "Grade 7").in_college(1);
        assert_eq!(ContextOption::id(&class), ClassId::new(7));
        assert_eq!(class.name(), "Grade 7");
        assert_eq!(class.college_id, Some(CollegeId::new(1)));
    }
}
