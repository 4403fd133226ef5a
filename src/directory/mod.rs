//! Fetch-transform pipelines behind every page.
//!
//! Each pipeline issues its WHOIS calls one after another. Nothing here is
//! cached; the squad snapshot lives in the application state.

use std::cmp::Ordering;

use feruca::Collator;

use crate::errors::AppError;
use crate::models::{CustomData, Person, PersonView, Reaction};
use crate::whois::{PersonQuery, WhoisClient};

/// Ordering applied to a person listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Keep the order the WHOIS API sorted by
    Remote,
    Ascending,
    Descending,
}

/// All persons, ordered as requested and decorated with avatars.
pub async fn list_persons(
    client: &WhoisClient,
    order: SortOrder,
) -> Result<Vec<PersonView>, AppError> {
    let mut persons = client.list_persons(PersonQuery::SortedByName).await?;
    sort_persons(&mut persons, order);
    Ok(decorate(persons))
}

/// Members of one squad, decorated with avatars.
pub async fn list_squad_members(
    client: &WhoisClient,
    squad_id: i64,
) -> Result<Vec<PersonView>, AppError> {
    let mut persons = client.list_persons(PersonQuery::Squad(squad_id)).await?;
    persons.retain(|person| person.squad_id == Some(squad_id));
    Ok(decorate(persons))
}

/// A single person for the detail page.
pub async fn person_detail(client: &WhoisClient, id: i64) -> Result<PersonView, AppError> {
    Ok(client.get_person(id).await?.into())
}

/// Add an emoji reaction to a person and write the `custom` field back.
///
/// This is a plain read-modify-write: two concurrent reactions on the same
/// person can overwrite each other. Returns the persisted `custom` string.
pub async fn add_reaction(
    client: &WhoisClient,
    id: i64,
    emoji: Option<&str>,
) -> Result<String, AppError> {
    let person = client.get_person(id).await?;

    let mut custom = CustomData::decode(person.custom.as_ref());
    custom.normalize();
    match emoji.and_then(Reaction::from_form_value) {
        Some(reaction) => {
            let count = custom.add_reaction(reaction);
            tracing::info!(person_id = id, reaction = reaction.form_value(), count, "Reaction added");
        }
        None => tracing::debug!(person_id = id, ?emoji, "Ignoring unknown reaction"),
    }

    let encoded = custom
        .encode()
        .map_err(|e| AppError::Internal(format!("Failed to encode custom field: {}", e)))?;
    client.patch_person_custom(id, &encoded).await?;

    Ok(encoded)
}

/// Sort persons by name on our side.
pub fn sort_persons(persons: &mut [Person], order: SortOrder) {
    let mut collator = Collator::default();
    match order {
        SortOrder::Remote => {}
        SortOrder::Ascending => persons.sort_by(|a, b| compare_by_name(&mut collator, a, b)),
        SortOrder::Descending => persons.sort_by(|a, b| compare_by_name(&mut collator, b, a)),
    }
}

/// Unicode collation order of names (CLDR root), with exact name and id as
/// tie breakers so that ascending and descending are mirror images.
pub fn compare_by_name(collator: &mut Collator, a: &Person, b: &Person) -> Ordering {
    collator
        .collate(a.name.as_str(), b.name.as_str())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

fn decorate(persons: Vec<Person>) -> Vec<PersonView> {
    persons.into_iter().map(PersonView::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn persons(names: &[(i64, &str)]) -> Vec<Person> {
        names
            .iter()
            .map(|(id, name)| serde_json::from_value(json!({ "id": id, "name": name })).unwrap())
            .collect()
    }

    fn names(persons: &[Person]) -> Vec<&str> {
        persons.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_sort_ascending_ignores_case() {
        let mut list = persons(&[(1, "bob"), (2, "Alice"), (3, "Carol"), (4, "dave")]);
        sort_persons(&mut list, SortOrder::Ascending);
        assert_eq!(names(&list), vec!["Alice", "bob", "Carol", "dave"]);
    }

    #[test]
    fn test_sort_accented_names_alongside_base_letters() {
        let mut list = persons(&[(1, "Zoë"), (2, "Émile"), (3, "Anna"), (4, "Ömer")]);
        sort_persons(&mut list, SortOrder::Ascending);
        assert_eq!(names(&list), vec!["Anna", "Émile", "Ömer", "Zoë"]);

        sort_persons(&mut list, SortOrder::Descending);
        assert_eq!(names(&list), vec!["Zoë", "Ömer", "Émile", "Anna"]);
    }

    #[test]
    fn test_descending_is_reverse_of_ascending() {
        let input = persons(&[(1, "Sam"), (2, "Sam"), (3, "ann"), (4, "Zoë"), (5, "Bea")]);

        let mut asc = input.clone();
        sort_persons(&mut asc, SortOrder::Ascending);
        let mut desc = input;
        sort_persons(&mut desc, SortOrder::Descending);

        let asc_ids: Vec<i64> = asc.iter().map(|p| p.id).collect();
        let mut desc_ids: Vec<i64> = desc.iter().map(|p| p.id).collect();
        desc_ids.reverse();
        assert_eq!(asc_ids, desc_ids);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut once = persons(&[(1, "b"), (2, "a"), (3, "c")]);
        sort_persons(&mut once, SortOrder::Descending);
        let mut twice = once.clone();
        sort_persons(&mut twice, SortOrder::Descending);
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn test_remote_order_is_kept() {
        let mut list = persons(&[(1, "b"), (2, "a")]);
        sort_persons(&mut list, SortOrder::Remote);
        assert_eq!(names(&list), vec!["b", "a"]);
    }
}
