use fnv::FnvHashMap;

use crate::errors::Error;

/// Maps the externally visible user and item identifiers to consecutive
/// integer indices. Indices are assigned in first-occurrence order, starting
/// at zero, so two passes over the same ordered input produce the same
/// mapping. Users and items have independent index spaces.
pub struct DataDictionary {
    user_dict: FnvHashMap<String, u32>,
    item_dict: FnvHashMap<String, u32>,
    num_interactions: u64,
}

impl DataDictionary {

    pub fn num_users(&self) -> usize {
        self.user_dict.len()
    }

    pub fn num_items(&self) -> usize {
        self.item_dict.len()
    }

    pub fn num_interactions(&self) -> u64 {
        self.num_interactions
    }

    pub fn user_index(&self, name: &str) -> Result<u32, Error> {
        self.user_dict
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownUser(name.to_string()))
    }

    pub fn item_index(&self, name: &str) -> Result<u32, Error> {
        self.item_dict
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownItem(name.to_string()))
    }

    pub fn item_entries(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.item_dict.iter().map(|(name, index)| (name.as_str(), *index))
    }
}

impl<'a, T> From<T> for DataDictionary
where
    T: Iterator<Item = &'a (String, String, f64)>,
{
    fn from(interactions: T) -> Self {

        let mut user_index: u32 = 0;
        let mut user_dict: FnvHashMap<String, u32> =
            FnvHashMap::with_capacity_and_hasher(100, Default::default());

        let mut item_index: u32 = 0;
        let mut item_dict: FnvHashMap<String, u32> =
            FnvHashMap::with_capacity_and_hasher(100, Default::default());

        let mut num_interactions: u64 = 0;

        for (user, item, _rating) in interactions {

            if !user_dict.contains_key(user) {
                user_dict.insert(user.clone(), user_index);
                user_index += 1;
            }

            if !item_dict.contains_key(item) {
                item_dict.insert(item.clone(), item_index);
                item_index += 1;
            }

            num_interactions += 1;
        }

        DataDictionary { user_dict, item_dict, num_interactions }
    }
}

/// Inverse of the [DataDictionary]: maps integer indices back to the original
/// identifiers.
pub struct Renaming {
    user_names: FnvHashMap<u32, String>,
    item_names: FnvHashMap<u32, String>,
}

impl Renaming {

    pub fn user_name(&self, user_index: u32) -> Result<&str, Error> {
        self.user_names
            .get(&user_index)
            .map(String::as_str)
            .ok_or(Error::UnknownIndex(user_index))
    }

    pub fn item_name(&self, item_index: u32) -> Result<&str, Error> {
        self.item_names
            .get(&item_index)
            .map(String::as_str)
            .ok_or(Error::UnknownIndex(item_index))
    }
}

impl From<DataDictionary> for Renaming {

    fn from(data_dict: DataDictionary) -> Self {

        let mut user_names: FnvHashMap<u32, String> =
            FnvHashMap::with_capacity_and_hasher(data_dict.num_users(), Default::default());

        let mut item_names: FnvHashMap<u32, String> =
            FnvHashMap::with_capacity_and_hasher(data_dict.num_items(), Default::default());

        for (user, user_id) in data_dict.user_dict.into_iter() {
            user_names.insert(user_id, user);
        }

        for (item, item_id) in data_dict.item_dict.into_iter() {
            item_names.insert(item_id, item);
        }

        Renaming { user_names, item_names }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::errors::Error;

    fn interactions() -> Vec<(String, String, f64)> {
        vec![
            ("alice".to_string(), "apple".to_string(), 5.0),
            ("alice".to_string(), "dog".to_string(), 3.0),
            ("bob".to_string(), "apple".to_string(), 4.0),
            ("charles".to_string(), "pony".to_string(), 2.0),
        ]
    }

    #[test]
    fn indices_assigned_in_first_occurrence_order() {
        let data_dict = DataDictionary::from(interactions().iter());

        assert_eq!(data_dict.num_users(), 3);
        assert_eq!(data_dict.num_items(), 3);
        assert_eq!(data_dict.num_interactions(), 4);

        assert_eq!(data_dict.user_index("alice").unwrap(), 0);
        assert_eq!(data_dict.user_index("bob").unwrap(), 1);
        assert_eq!(data_dict.user_index("charles").unwrap(), 2);

        assert_eq!(data_dict.item_index("apple").unwrap(), 0);
        assert_eq!(data_dict.item_index("dog").unwrap(), 1);
        assert_eq!(data_dict.item_index("pony").unwrap(), 2);
    }

    #[test]
    fn encoding_is_deterministic_for_fixed_input_order() {
        let first = DataDictionary::from(interactions().iter());
        let second = DataDictionary::from(interactions().iter());

        for (_, item, _) in interactions().iter() {
            assert_eq!(
                first.item_index(item).unwrap(),
                second.item_index(item).unwrap()
            );
        }
        for (user, _, _) in interactions().iter() {
            assert_eq!(
                first.user_index(user).unwrap(),
                second.user_index(user).unwrap()
            );
        }
    }

    #[test]
    fn decode_round_trips_every_encoded_id() {
        let data_dict = DataDictionary::from(interactions().iter());

        let user_indices: Vec<(String, u32)> = interactions()
            .iter()
            .map(|(user, _, _)| (user.clone(), data_dict.user_index(user).unwrap()))
            .collect();
        let item_indices: Vec<(String, u32)> = interactions()
            .iter()
            .map(|(_, item, _)| (item.clone(), data_dict.item_index(item).unwrap()))
            .collect();

        let renaming = Renaming::from(data_dict);

        for (user, index) in user_indices {
            assert_eq!(renaming.user_name(index).unwrap(), user);
        }
        for (item, index) in item_indices {
            assert_eq!(renaming.item_name(index).unwrap(), item);
        }
    }

    #[test]
    fn unknown_lookups_fail() {
        let data_dict = DataDictionary::from(interactions().iter());

        assert!(matches!(data_dict.user_index("mallory"), Err(Error::UnknownUser(_))));
        assert!(matches!(data_dict.item_index("zebra"), Err(Error::UnknownItem(_))));

        let renaming = Renaming::from(data_dict);
        assert!(matches!(renaming.item_name(99), Err(Error::UnknownIndex(99))));
        assert!(matches!(renaming.user_name(99), Err(Error::UnknownIndex(99))));
    }
}
