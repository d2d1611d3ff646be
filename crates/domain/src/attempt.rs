use crate::{
    identity::Identity,
    shared::entity::{Entity, ID},
    test::Test,
};
use std::collections::{HashMap, HashSet};

/// Records that someone attempted a `Test`. The attempt tracking system is
/// not consistent about which keys it uses: the identity may be a
/// `Student` id, a `User` id or both, and `test_ref` may be any of the
/// `Test`s reference keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub id: ID,
    pub test_ref: String,
    pub student_id: Option<ID>,
    pub user_id: Option<ID>,
    pub attempted_at: i64,
}

impl Attempt {
    pub fn by_student(test_ref: &str, student_id: ID) -> Self {
        Self {
            id: Default::default(),
            test_ref: test_ref.to_string(),
            student_id: Some(student_id),
            user_id: None,
            attempted_at: 0,
        }
    }

    pub fn by_user(test_ref: &str, user_id: ID) -> Self {
        Self {
            id: Default::default(),
            test_ref: test_ref.to_string(),
            student_id: None,
            user_id: Some(user_id),
            attempted_at: 0,
        }
    }
}

impl Entity for Attempt {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Lookup of which `Test`s have been attempted, per identity space.
/// Sets contain `Test` database ids.
#[derive(Debug, Default)]
pub struct AttemptIndex {
    by_student_id: HashMap<String, HashSet<String>>,
    by_user_id: HashMap<String, HashSet<String>>,
}

impl AttemptIndex {
    /// Single pass over `attempts`. Attempts that do not reference any of
    /// the given `tests` are ignored.
    pub fn build(tests: &[Test], attempts: &[Attempt]) -> Self {
        // A key may be shared, e.g. one display id equal to another test id
        let mut test_lookup: HashMap<String, Vec<String>> = HashMap::new();
        for test in tests {
            let db_id = test.id.as_string();
            for key in test.reference_keys() {
                test_lookup.entry(key).or_default().push(db_id.clone());
            }
        }

        let mut index = Self::default();
        for attempt in attempts {
            let test_ids = match test_lookup.get(&attempt.test_ref) {
                Some(ids) => ids,
                None => continue,
            };
            if let Some(student_id) = &attempt.student_id {
                index
                    .by_student_id
                    .entry(student_id.as_string())
                    .or_default()
                    .extend(test_ids.iter().cloned());
            }
            if let Some(user_id) = &attempt.user_id {
                index
                    .by_user_id
                    .entry(user_id.as_string())
                    .or_default()
                    .extend(test_ids.iter().cloned());
            }
        }

        index
    }

    pub fn attempted_as_student(&self, identity: &Identity, test: &Test) -> bool {
        contains(&self.by_student_id, &identity.as_student_key(), test)
    }

    pub fn attempted_as_user(&self, identity: &Identity, test: &Test) -> bool {
        match identity.as_user_key() {
            Some(key) => contains(&self.by_user_id, &key, test),
            None => false,
        }
    }

    /// An attempt in either identity space counts
    pub fn attempted(&self, identity: &Identity, test: &Test) -> bool {
        self.attempted_as_student(identity, test) || self.attempted_as_user(identity, test)
    }
}

fn contains(map: &HashMap<String, HashSet<String>>, key: &str, test: &Test) -> bool {
    map.get(key)
        .map(|tests| tests.contains(&test.id.as_string()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_factory(test_id: &str, display_id: Option<&str>) -> Test {
        let mut test = Test::new(test_id, test_id);
        test.display_id = display_id.map(String::from);
        test
    }

    #[test]
    fn it_matches_attempts_on_every_reference_key() {
        let t1 = test_factory("T1", Some("ALG-1"));
        let t2 = test_factory("T2", None);
        let t3 = test_factory("T3", None);
        let s1 = Identity::new(ID::new());
        let s2 = Identity::new(ID::new());
        let s3 = Identity::new(ID::new());

        let attempts = vec![
            Attempt::by_student("T1", s1.student_id.clone()),
            Attempt::by_student("ALG-1", s2.student_id.clone()),
            Attempt::by_student(&t2.id.as_string(), s3.student_id.clone()),
        ];
        let index = AttemptIndex::build(&[t1.clone(), t2.clone(), t3.clone()], &attempts);

        assert!(index.attempted(&s1, &t1));
        assert!(index.attempted(&s2, &t1));
        assert!(index.attempted(&s3, &t2));
        assert!(!index.attempted(&s1, &t2));
        assert!(!index.attempted(&s3, &t3));
    }

    #[test]
    fn it_ignores_attempts_for_unknown_tests() {
        let t1 = test_factory("T1", None);
        let s1 = Identity::new(ID::new());
        let attempts = vec![Attempt::by_student("T9", s1.student_id.clone())];
        let index = AttemptIndex::build(&[t1.clone()], &attempts);
        assert!(!index.attempted(&s1, &t1));
    }

    #[test]
    fn it_indexes_both_identity_spaces_from_one_record() {
        let t1 = test_factory("T1", None);
        let student_id = ID::new();
        let user_id = ID::new();
        let mut attempt = Attempt::by_student("T1", student_id.clone());
        attempt.user_id = Some(user_id.clone());
        let index = AttemptIndex::build(&[t1.clone()], &[attempt]);

        let only_student = Identity::new(student_id);
        assert!(index.attempted_as_student(&only_student, &t1));
        assert!(!index.attempted_as_user(&only_student, &t1));

        let other_student_same_user = Identity::with_user(ID::new(), Some(user_id));
        assert!(!index.attempted_as_student(&other_student_same_user, &t1));
        assert!(index.attempted_as_user(&other_student_same_user, &t1));
        assert!(index.attempted(&other_student_same_user, &t1));
    }

    #[test]
    fn it_credits_every_test_sharing_a_reference_key() {
        let t1 = test_factory("T1", Some("T2"));
        let t2 = test_factory("T2", None);
        let s1 = Identity::new(ID::new());
        let attempts = vec![Attempt::by_student("T2", s1.student_id.clone())];
        let index = AttemptIndex::build(&[t1.clone(), t2.clone()], &attempts);

        assert!(index.attempted(&s1, &t1));
        assert!(index.attempted(&s1, &t2));
    }
}
