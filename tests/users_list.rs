//! Users list against an in-memory pod: creation, header, ACL, add/delete
//! and activity lookups.
//!
//! Run with: `cargo test --test users_list`

mod common;

use common::{alice, ALICE_POD, ALICE_WEB_ID, BOB_POD, BOB_WEB_ID};
use pass::pod::acl::agent_access;
use pass::{AccessModes, PodClient, User};

const USERS_DOC: &str = "https://alice.example/Users/userlist.ttl";

#[tokio::test]
async fn fresh_pod_creates_empty_users_list() {
    let (client, pod) = alice();
    let users = client.users().unwrap();
    assert_eq!(users.url(), USERS_DOC);

    let loaded = users.load().await.unwrap();

    assert!(loaded.is_empty());
    assert_eq!(pod.creations(USERS_DOC), 1);
    let turtle = pod.turtle(USERS_DOC).unwrap();
    assert!(turtle.contains("Users List"));
    assert!(turtle.contains("A list of users"));
}

#[tokio::test]
async fn created_list_is_private_to_owner() {
    let (client, pod) = alice();
    client.users().unwrap().load().await.unwrap();

    assert_eq!(
        agent_access(pod.as_ref(), USERS_DOC, ALICE_WEB_ID).await.unwrap(),
        AccessModes::FULL
    );
    assert_eq!(
        agent_access(pod.as_ref(), USERS_DOC, BOB_WEB_ID).await.unwrap(),
        AccessModes::NONE
    );
}

#[tokio::test]
async fn add_then_load_returns_one_user() {
    let (client, _pod) = alice();
    let users = client.users().unwrap();
    users.load().await.unwrap();

    users
        .add(User::new("alice", "Alice", "A", ALICE_WEB_ID))
        .await
        .unwrap();
    let loaded = users.refetch().await.unwrap();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].person, "Alice A");
    assert_eq!(loaded[0].username, "alice");
    assert_eq!(loaded[0].pod_url, ALICE_POD);
}

#[tokio::test]
async fn add_uses_storage_advertised_by_profile() {
    let (client, pod) = alice();
    pod.insert_turtle(
        "https://bob.example/profile/card",
        "@prefix pim: <http://www.w3.org/ns/pim/space#> .\n\
         <#me> pim:storage <https://storage.example/bob/> .",
    );

    let loaded = client
        .users()
        .unwrap()
        .add(User::new("bob", "Bob", "B", BOB_WEB_ID))
        .await
        .unwrap();

    assert_eq!(loaded[0].pod_url, "https://storage.example/bob/");
}

#[tokio::test]
async fn delete_by_web_id_empties_list() {
    let (client, pod) = alice();
    let users = client.users().unwrap();
    users
        .add(User::new("alice", "Alice", "A", ALICE_WEB_ID))
        .await
        .unwrap();

    let remaining = users.delete(ALICE_WEB_ID).await.unwrap();
    assert!(remaining.is_empty());

    // the header survives deletes
    let reloaded = users.refetch().await.unwrap();
    assert!(reloaded.is_empty());
    assert!(pod.turtle(USERS_DOC).unwrap().contains("Users List"));
}

#[tokio::test]
async fn delete_unknown_web_id_writes_nothing() {
    let (client, pod) = alice();
    let users = client.users().unwrap();
    users
        .add(User::new("alice", "Alice", "A", ALICE_WEB_ID))
        .await
        .unwrap();
    let writes = pod.writes().len();

    let remaining = users.delete(BOB_WEB_ID).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(pod.writes().len(), writes);
}

#[tokio::test]
async fn with_activity_tolerates_missing_documents() {
    let (client, pod) = alice();
    let users = client.users().unwrap();
    users
        .add(User::new("alice", "Alice", "A", ALICE_WEB_ID))
        .await
        .unwrap();
    users
        .add(User::new("bob", "Bob", "B", BOB_WEB_ID))
        .await
        .unwrap();
    let stamped = client.update_activity().await.unwrap().unwrap();
    pod.fail_with(&format!("{}public/active.ttl", BOB_POD), 403);

    let loaded = users.load().await.unwrap();
    let with_activity = users.with_activity(loaded).await;

    let alice = with_activity.iter().find(|u| u.username == "alice").unwrap();
    let bob = with_activity.iter().find(|u| u.username == "bob").unwrap();
    assert_eq!(alice.date_modified, Some(stamped));
    assert_eq!(bob.date_modified, None);
    // looking up activity never creates documents in other pods
    assert!(!pod.contains(&format!("{}public/active.ttl", BOB_POD)));
}

#[tokio::test]
async fn existing_list_written_without_usernames_still_loads() {
    let (client, pod) = alice();
    pod.insert_turtle(
        USERS_DOC,
        "@prefix schema: <http://schema.org/> .\n\
         <#userlist> schema:name \"Users List\" ; schema:description \"A list of users\" .\n\
         <#carol> schema:Person \"Carol C\" ; schema:givenName \"Carol\" ;\n\
             schema:familyName \"C\" ;\n\
             schema:identifier <https://carol.example/profile/card#me> ;\n\
             schema:URL <https://carol.example/> .",
    );

    let loaded = client.users().unwrap().load().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].username, "carol");
    assert!(pod.writes().is_empty());
    assert_eq!(pod.fetch_dataset(USERS_DOC).await.unwrap().len(), 2);
}
