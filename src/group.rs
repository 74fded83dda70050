use std::{collections::HashMap, hash::Hash};

use crate::error::{Error, Result};
use crate::timetable::models::CourseInfo;

/// Items bucketed by key, keys kept in the order they were first seen
#[derive(Debug)]
pub struct Groups<K, T> {
    index: HashMap<K, usize>,
    buckets: Vec<(K, Vec<T>)>,
}

impl<K: Eq + Hash + Clone, T> Groups<K, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            buckets: vec![],
        }
    }

    pub fn push(&mut self, key: K, item: T) {
        if let Some(&i) = self.index.get(&key) {
            self.buckets[i].1.push(item);
        } else {
            self.index.insert(key.clone(), self.buckets.len());
            self.buckets.push((key, vec![item]));
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&[T]>
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&i| self.buckets[i].1.as_slice())
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut Vec<T>>
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&i| &mut self.buckets[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> {
        self.buckets.iter().map(|(k, items)| (k, items.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<K: Eq + Hash + Clone, T> Default for Groups<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Partition the courses with the key given by `key`.
///
/// A course for which `key` returns `None` can't be placed and fails the
/// whole grouping.
pub fn group_courses_by<K, F>(
    courses: impl IntoIterator<Item = CourseInfo>,
    key: F,
) -> Result<Groups<K, CourseInfo>>
where
    K: Eq + Hash + Clone,
    F: Fn(&CourseInfo) -> Option<K>,
{
    let mut groups = Groups::new();
    for course in courses {
        let Some(k) = key(&course) else {
            return Err(Error::MissingGroupKey(course.name_and_section));
        };
        groups.push(k, course);
    }

    Ok(groups)
}

/// Key courses by their instructor's display name
pub fn by_instructor_name(course: &CourseInfo) -> Option<String> {
    course.instructor_name().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::timetable::models::{InstructorInfo, Time, Weekday};

    fn course(name: &str, instructor: Option<&Arc<InstructorInfo>>) -> CourseInfo {
        CourseInfo {
            name_and_section: name.into(),
            ty: "LEC".into(),
            days: vec![Weekday::M],
            start_time: Time::new(8, 10),
            end_time: Time::new(9, 0),
            instructor: instructor.cloned(),
            location: "192-0101".into(),
        }
    }

    fn instructor(name: &str) -> Arc<InstructorInfo> {
        Arc::new(InstructorInfo {
            name: name.into(),
            ext: String::new(),
            email: String::new(),
            office_location: String::new(),
        })
    }

    #[test]
    fn partition_keeps_first_seen_order() {
        let (b, a) = (instructor("B"), instructor("A"));
        let courses = vec![
            course("c1", Some(&b)),
            course("c2", Some(&a)),
            course("c3", Some(&b)),
            course("c4", Some(&a)),
            course("c5", Some(&b)),
        ];

        let groups = group_courses_by(courses, by_instructor_name).unwrap();

        assert_eq!(groups.keys().collect::<Vec<_>>(), ["B", "A"]);
        let names = |key: &str| {
            groups
                .get(key)
                .unwrap()
                .iter()
                .map(|c| c.name_and_section.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(names("B"), ["c1", "c3", "c5"]);
        assert_eq!(names("A"), ["c2", "c4"]);
        assert_eq!(groups.iter().map(|(_, c)| c.len()).sum::<usize>(), 5);
    }

    #[test]
    fn course_without_key_fails() {
        let a = instructor("A");
        let courses = vec![course("c1", Some(&a)), course("orphan", None)];
        assert!(matches!(
            group_courses_by(courses, by_instructor_name),
            Err(Error::MissingGroupKey(name)) if name == "orphan"
        ));
    }

    #[test]
    fn empty_input() {
        let groups = group_courses_by(vec![], by_instructor_name).unwrap();
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
    }
}
