use exam_notifier_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_notifier_domain::Student;

    #[test]
    fn it_finds_inserted_entities() {
        let collection = Mutex::new(Vec::new());
        let ada = Student::new("Ada");
        let grace = Student::new("Grace");
        insert(&ada, &collection);
        insert(&grace, &collection);

        assert_eq!(find(&grace.id, &collection), Some(grace.clone()));
        assert_eq!(find(&ID::default(), &collection), None);
        assert_eq!(find_by(&collection, |s: &Student| s.name == "Ada"), vec![ada]);
    }
}
