//! Contacts, messaging between pods, documents and activity through
//! `PassClient`.
//!
//! Run with: `cargo test --test contacts_and_messages`

mod common;

use common::{alice, second_client, ALICE_POD, ALICE_WEB_ID, BOB_POD, BOB_WEB_ID};
use pass::model::unread_count;
use pass::pod::acl::agent_access;
use pass::{AccessModes, CollectionError, Contact, MailBox, Message, PodError};

const CONTACTS_DOC: &str = "https://alice.example/PASS/Users/userlist.ttl";

#[tokio::test]
async fn contacts_scenario() {
    let (client, pod) = alice();
    let contacts = client.contacts().unwrap();

    assert!(contacts.load().await.unwrap().is_empty());
    assert_eq!(pod.creations(CONTACTS_DOC), 1);

    contacts
        .add(&Contact::new("alice", "Alice", "A", ALICE_WEB_ID))
        .await
        .unwrap();
    let loaded = contacts.load().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].person, "Alice A");

    let remaining = contacts.delete("alice").await.unwrap();
    assert!(remaining.is_empty());
    assert!(contacts.refetch().await.unwrap().is_empty());
}

#[tokio::test]
async fn contacts_and_users_lists_are_separate_documents() {
    let (client, _pod) = alice();
    let contacts = client.contacts().unwrap();
    let users = client.users().unwrap();
    assert_ne!(contacts.url(), users.url());

    contacts
        .add(&Contact::new("bob", "Bob", "B", BOB_WEB_ID))
        .await
        .unwrap();
    assert!(users.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn lists_from_one_client_share_cache() {
    let (client, pod) = alice();
    client
        .contacts()
        .unwrap()
        .add(&Contact::new("bob", "Bob", "B", BOB_WEB_ID))
        .await
        .unwrap();
    pod.fail_with(CONTACTS_DOC, 503);

    // a fresh handle sees the write without going back to the pod
    let other_handle = client.contacts().unwrap();
    let cached = other_handle.cached().unwrap().unwrap();
    assert_eq!(cached.len(), 1);
}

#[tokio::test]
async fn concurrent_editors_see_stale_error() {
    let (client, pod) = alice();
    let other_device = second_client(&pod, ALICE_WEB_ID, ALICE_POD);
    let mine = client.contacts().unwrap();
    let theirs = other_device.contacts().unwrap();
    mine.load().await.unwrap();
    theirs.load().await.unwrap();

    theirs
        .add(&Contact::new("bob", "Bob", "B", BOB_WEB_ID))
        .await
        .unwrap();
    let err = mine
        .add(&Contact::new("carol", "Carol", "C", "https://carol.example/profile/card#me"))
        .await
        .unwrap_err();
    assert!(err.is_stale());

    let merged = mine
        .add(&Contact::new("carol", "Carol", "C", "https://carol.example/profile/card#me"))
        .await
        .unwrap();
    assert_eq!(merged.len(), 2);
}

#[tokio::test]
async fn sent_message_lands_in_both_mailboxes() {
    let (alice_client, pod) = alice();
    let bob_client = second_client(&pod, BOB_WEB_ID, BOB_POD);

    let message = Message::compose("Appointment", "See you Monday", "Alice A", ALICE_WEB_ID, "Bob B");
    alice_client.send_message(BOB_POD, &message).await.unwrap();

    let outbox = alice_client.messages(MailBox::Outbox).unwrap().load().await.unwrap();
    assert_eq!(outbox.len(), 1);

    let inbox = bob_client.messages(MailBox::Inbox).unwrap();
    let received = inbox.load().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].title, "Appointment");
    assert_eq!(received[0].sender_web_id, ALICE_WEB_ID);
    assert_eq!(unread_count(&received), 1);

    let after_read = inbox.mark_read(&message.message_id).await.unwrap();
    assert_eq!(unread_count(&after_read), 0);
    assert!(inbox.delete(&message.message_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn activity_is_public_but_owner_controlled() {
    let (alice_client, pod) = alice();
    let bob_client = second_client(&pod, BOB_WEB_ID, BOB_POD);
    let activity_doc = format!("{}public/active.ttl", ALICE_POD);

    assert_eq!(bob_client.user_activity(ALICE_POD).await, None);
    let stamped = alice_client.update_activity().await.unwrap();

    assert_eq!(bob_client.user_activity(ALICE_POD).await, stamped);
    assert_eq!(
        agent_access(pod.as_ref(), &activity_doc, BOB_WEB_ID).await.unwrap(),
        AccessModes::READ_ONLY
    );
    assert_eq!(
        agent_access(pod.as_ref(), &activity_doc, ALICE_WEB_ID).await.unwrap(),
        AccessModes::FULL
    );
}

#[tokio::test]
async fn contact_with_unwritable_web_id_is_refused() {
    let (client, pod) = alice();
    let contacts = client.contacts().unwrap();
    contacts
        .add(&Contact::new("bob", "Bob", "B", BOB_WEB_ID))
        .await
        .unwrap();
    let writes = pod.writes().len();

    let err = contacts
        .add(&Contact::new("bad", "Bad", "B", "https://b.example/my profile>#me"))
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::Pod(PodError::Rdf(_))));
    assert_eq!(pod.writes().len(), writes);

    // the stored list is untouched and still readable
    let loaded = contacts.refetch().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].username, "bob");
}

#[tokio::test]
async fn nested_descriptions_survive_edits() {
    let (client, pod) = alice();
    pod.insert_turtle(
        CONTACTS_DOC,
        "@prefix schema: <http://schema.org/> .\n\
         <#bob> schema:Person \"Bob B\" ; schema:givenName \"Bob\" ;\n\
             schema:familyName \"B\" ; schema:alternateName \"bob\" ;\n\
             schema:identifier <https://bob.example/profile/card#me> ;\n\
             schema:URL <https://bob.example/> ;\n\
             schema:address [ schema:addressLocality \"Leeds\" ] .",
    );
    let contacts = client.contacts().unwrap();
    assert_eq!(contacts.load().await.unwrap().len(), 1);

    contacts
        .add(&Contact::new("carol", "Carol", "C", "https://carol.example/profile/card#me"))
        .await
        .unwrap();

    assert!(pod.turtle(CONTACTS_DOC).unwrap().contains("Leeds"));
    assert_eq!(contacts.refetch().await.unwrap().len(), 2);
}
