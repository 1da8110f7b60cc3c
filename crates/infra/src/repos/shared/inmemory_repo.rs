use std::sync::Mutex;
use tarefa_domain::{Entity, ID};

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    collection.lock().unwrap().push(val.clone());
}

pub fn save<T: Entity<ID> + Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    if let Some(pos) = collection.iter().position(|item| item.id() == val.id()) {
        collection[pos] = val.clone();
    }
}

pub fn delete<T: Entity<ID> + Clone>(id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    collection
        .iter()
        .position(|item| item.id() == *id)
        .map(|pos| collection.remove(pos))
}

pub fn find<T: Entity<ID> + Clone>(id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    collection
        .lock()
        .unwrap()
        .iter()
        .find(|item| item.id() == *id)
        .cloned()
}

pub fn find_by<T: Clone, F: Fn(&T) -> bool>(collection: &Mutex<Vec<T>>, pred: F) -> Vec<T> {
    collection
        .lock()
        .unwrap()
        .iter()
        .filter(|item| pred(item))
        .cloned()
        .collect()
}
