//! Integration tests for the link/unlink workflow over a record directory.

use talentlink::{
    AssociationStore, Config, EntityKind, EntityRecord, EntityRef, InMemoryDirectory,
    LinkService, NameResolver, RelationType, SearchProvider,
};

fn directory() -> InMemoryDirectory {
    [
        EntityRecord::new(EntityRef::company("comp1"), "Acme Corp").with_subtitle("Manufacturing"),
        EntityRecord::new(EntityRef::company("comp2"), "Globex").with_subtitle("Energy"),
        EntityRecord::new(EntityRef::contact("contact1"), "Jane Doe")
            .with_subtitle("Head of Talent"),
        EntityRecord::new(EntityRef::contact("contact2"), "John Roe").with_subtitle("CTO"),
        EntityRecord::new(EntityRef::job("job1"), "Backend Engineer").with_subtitle("Remote"),
        EntityRecord::new(EntityRef::candidate("cand1"), "Ada Lovelace"),
        EntityRecord::new(EntityRef::candidate("cand2"), "Alan Turing"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_link_from_search_result() {
    let store = AssociationStore::new(Config::default()).unwrap();
    let directory = directory();
    let links = LinkService::new(&store, &directory);
    let job = EntityRef::job("job1");

    let choices = links
        .available_to_link(&job, RelationType::Candidates, "ada")
        .unwrap();
    assert_eq!(choices.len(), 1);
    assert_eq!(choices[0].entity.kind, EntityKind::Candidate);

    let outcome = links
        .link(&job, RelationType::Candidates, &choices[0].entity.id)
        .unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.message, "Linked Ada Lovelace to Backend Engineer");
    assert_eq!(outcome.associations.len(), 1);

    // Inverse panel on the candidate shows the job
    let jobs = links
        .related_records(&EntityRef::candidate("cand1"), RelationType::Jobs)
        .unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].name, "Backend Engineer");
    assert_eq!(jobs[0].route, "/jobs/job1");
}

#[test]
fn test_related_records_follow_bucket_order() {
    let store = AssociationStore::new(Config::default()).unwrap();
    let directory = directory();
    let links = LinkService::new(&store, &directory);
    let company = EntityRef::company("comp1");

    links.link(&company, RelationType::Contacts, "contact2").unwrap();
    links.link(&company, RelationType::Contacts, "contact1").unwrap();

    let names: Vec<String> = links
        .related_records(&company, RelationType::Contacts)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["John Roe", "Jane Doe"]);
}

#[test]
fn test_unlink_then_candidate_is_available_again() {
    let store = AssociationStore::new(Config::default()).unwrap();
    let directory = directory();
    let links = LinkService::new(&store, &directory);
    let company = EntityRef::company("comp1");

    links.link(&company, RelationType::Contacts, "contact1").unwrap();
    assert_eq!(
        links
            .available_to_link(&company, RelationType::Contacts, "")
            .unwrap()
            .len(),
        1
    );

    let outcome = links
        .unlink(&company, RelationType::Contacts, "contact1")
        .unwrap();
    assert_eq!(outcome.message, "Unlinked Jane Doe from Acme Corp");
    assert!(outcome.associations.is_empty());
    assert_eq!(
        links
            .available_to_link(&company, RelationType::Contacts, "")
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_deleted_record_hidden_until_detached() {
    let store = AssociationStore::new(Config::default()).unwrap();
    let mut directory = directory();
    let company = EntityRef::company("comp1");
    store
        .add_association(&company, RelationType::Contacts, "contact1")
        .unwrap();
    store
        .add_association(&company, RelationType::Contacts, "contact2")
        .unwrap();

    // Record deleted elsewhere: panels hide it, store still holds the id
    directory.remove(&EntityRef::contact("contact2"));
    {
        let links = LinkService::new(&store, &directory);
        assert_eq!(
            links
                .related_records(&company, RelationType::Contacts)
                .unwrap()
                .len(),
            1
        );
    }
    assert_eq!(
        store
            .get_associations(&company, RelationType::Contacts)
            .unwrap()
            .len(),
        2
    );

    // Explicit sweep cleans the store
    store.detach_entity(&EntityRef::contact("contact2")).unwrap();
    assert_eq!(
        store
            .get_associations(&company, RelationType::Contacts)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_directory_as_trait_objects() {
    let directory = directory();
    let search: &dyn SearchProvider = &directory;
    let hits = search.search("e", Some(EntityKind::Company));
    assert_eq!(hits.len(), 2);

    assert_eq!(
        directory.display_name(&EntityRef::job("job1")),
        Some("Backend Engineer".to_string())
    );
}
