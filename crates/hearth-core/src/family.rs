//! Family document model.

use serde::{Deserialize, Serialize};

/// A family document as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDoc {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub family_members: Vec<FamilyMember>,
}

/// A single member entry inside a family document.
///
/// Member entries are loosely structured: `role` and `isParent` are both
/// optional and carry independent fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_parent: Option<bool>,
    #[serde(default)]
    pub age: Option<i64>,
}

impl FamilyMember {
    /// Effective role; members without one default to `child`.
    pub fn role_or_default(&self) -> &str {
        self.role.as_deref().unwrap_or("child")
    }

    /// Effective parent flag. A missing `isParent` means child; the `role`
    /// field is deliberately not consulted here.
    pub fn is_parent(&self) -> bool {
        self.is_parent.unwrap_or(false)
    }
}

/// All (parent, child) pairs of a family, the full cross-product.
///
/// Recomputed on every family write; MERGE keeps the result idempotent even
/// though the work is O(parents x children).
pub fn parent_child_pairs(members: &[FamilyMember]) -> Vec<(&str, &str)> {
    let parents: Vec<&FamilyMember> = members.iter().filter(|m| m.is_parent()).collect();
    let children: Vec<&FamilyMember> = members.iter().filter(|m| !m.is_parent()).collect();

    let mut pairs = Vec::with_capacity(parents.len() * children.len());
    for parent in &parents {
        for child in &children {
            pairs.push((parent.user_id.as_str(), child.user_id.as_str()));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member(user_id: &str, is_parent: Option<bool>) -> FamilyMember {
        FamilyMember {
            user_id: user_id.to_string(),
            name: Some(user_id.to_string()),
            role: None,
            is_parent,
            age: None,
        }
    }

    #[test]
    fn test_cross_product_two_parents_one_child() {
        let members = vec![
            member("p1", Some(true)),
            member("p2", Some(true)),
            member("c1", Some(false)),
        ];
        let pairs = parent_child_pairs(&members);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("p1", "c1")));
        assert!(pairs.contains(&("p2", "c1")));
    }

    #[test]
    fn test_missing_is_parent_treated_as_child() {
        let members = vec![member("p1", Some(true)), member("unknown", None)];
        let pairs = parent_child_pairs(&members);
        assert_eq!(pairs, vec![("p1", "unknown")]);
    }

    #[test]
    fn test_no_children_yields_no_pairs() {
        let members = vec![member("p1", Some(true)), member("p2", Some(true))];
        assert!(parent_child_pairs(&members).is_empty());
    }

    #[test]
    fn test_decode_with_fallbacks() {
        let doc: FamilyDoc = serde_json::from_value(json!({
            "name": "The Riveras",
            "familyMembers": [
                {"userId": "rivera_mama", "name": "Ana", "role": "parent", "isParent": true, "age": 38},
                {"userId": "rivera_leo", "name": "Leo"}
            ]
        }))
        .unwrap();

        assert_eq!(doc.family_members.len(), 2);
        let leo = &doc.family_members[1];
        assert_eq!(leo.role_or_default(), "child");
        assert!(!leo.is_parent());
        assert!(leo.age.is_none());
    }
}
