//! End-to-end create/show flows through the standard container.

use std::sync::Arc;

use swine::{
    Avatar, CREATED_UID, Container, Indexable, MockUser, Presentable, SwineError, UNSET_UID, User,
    setup,
};

#[test]
fn resolve_user_with_username() {
    let container = setup();
    let user: Arc<dyn User> = container.resolve_with("test001".to_string()).unwrap();

    assert_eq!(user.uid(), UNSET_UID);
    assert_eq!(user.username().as_deref(), Some("test001"));
    assert!(user.avatar().is_none());

    user.create(None);
    assert_eq!(user.uid(), CREATED_UID);
}

#[test]
fn resolve_avatar_with_author() {
    let container = setup();
    let user: Arc<dyn User> = container.resolve_with("test001".to_string()).unwrap();
    let avatar: Arc<dyn Avatar> = container.resolve_with(user.clone()).unwrap();

    assert_eq!(avatar.uid(), UNSET_UID);
    assert!(Arc::ptr_eq(&avatar.author().unwrap(), &user));

    avatar.create(None);
    assert_eq!(avatar.uid(), CREATED_UID);

    user.set_avatar(Some(avatar.clone()));
    user.create(None);
    assert!(user.is_valid());
    assert!(Arc::ptr_eq(&user.avatar().unwrap(), &avatar));
}

#[test]
fn author_passed_as_only_handle_is_not_kept() {
    let container = setup();
    let user: Arc<dyn User> = container.resolve_with("test001".to_string()).unwrap();
    let weak_user = Arc::downgrade(&user);

    let avatar: Arc<dyn Avatar> = container.resolve_with(user).unwrap();
    assert!(avatar.author().is_none());
    assert!(weak_user.upgrade().is_none());
}

#[test]
fn zero_argument_resolution_is_unset() {
    let container = setup();

    let user: Arc<dyn User> = container.resolve().unwrap();
    assert_eq!(user.uid(), UNSET_UID);
    assert!(!user.is_valid());
    assert!(user.username().is_none());

    let avatar: Arc<dyn Avatar> = container.resolve().unwrap();
    assert_eq!(avatar.uid(), UNSET_UID);
    assert!(avatar.author().is_none());
}

#[test]
fn show_user_attaches_created_avatar() {
    let container = setup();
    let user: Arc<dyn User> = container.resolve().unwrap();
    user.clone().show(42, &container).unwrap();

    assert_eq!(user.uid(), 42);
    assert_eq!(user.username().as_deref(), Some("test042"));

    let avatar = user.avatar().expect("avatar attached");
    assert_eq!(avatar.uid(), CREATED_UID);
    assert!(Arc::ptr_eq(&avatar.author().unwrap(), &user));

    let dump = user.to_string();
    assert!(dump.contains("\tusername: test042\n"));
    assert!(dump.contains("\tvalidity: true\n"));
    assert!(avatar.to_string().contains("\tID: 1\n"));
}

#[test]
fn show_avatar_attaches_fetched_user() {
    let container = setup();
    let avatar: Arc<dyn Avatar> = container.resolve().unwrap();
    avatar.clone().show(42, &container).unwrap();

    assert_eq!(avatar.uid(), 42);
    assert_eq!(avatar.image_url(), "http://test.com/image042.png");

    let author = avatar.author().expect("author attached");
    assert_eq!(author.uid(), 42);
    assert_eq!(author.username().as_deref(), Some("test042"));

    // the author's own avatar is a different, freshly created one
    let authors_avatar = author.avatar().expect("author has an avatar");
    assert!(!Arc::ptr_eq(&authors_avatar, &avatar));
    assert_eq!(authors_avatar.uid(), CREATED_UID);
}

#[test]
fn show_is_deterministic() {
    let container = setup();
    let user: Arc<dyn User> = container.resolve().unwrap();
    user.clone().show(7, &container).unwrap();
    let first = user.avatar().unwrap();
    user.clone().show(7, &container).unwrap();

    assert_eq!(user.username().as_deref(), Some("test007"));
    assert!(!Arc::ptr_eq(&first, &user.avatar().unwrap()));
}

#[test]
fn concrete_argument_type_is_a_different_shape() {
    let container = setup();
    let concrete = Arc::new(MockUser::new());

    let result = container.resolve_with::<Arc<dyn Avatar>, Arc<MockUser>>(concrete);
    assert!(matches!(result, Err(SwineError::NotRegistered(_))));
}

#[test]
fn empty_container_reports_absence() {
    let container = Container::new();
    assert!(matches!(
        container.resolve::<Arc<dyn User>>(),
        Err(SwineError::NotRegistered(_))
    ));
    assert!(matches!(
        container.resolve_with::<Arc<dyn User>, String>("x".into()),
        Err(SwineError::NotRegistered(_))
    ));
}

#[test]
fn overriding_a_factory_changes_what_show_attaches() {
    let container = setup();
    container.register_with::<Arc<dyn Avatar>, Arc<dyn User>>(|_, author| {
        let avatar = swine::MockAvatar::with_author(&author);
        avatar.set_image_url("http://example.com/custom.png");
        Ok(Arc::new(avatar) as Arc<dyn Avatar>)
    });

    let user: Arc<dyn User> = container.resolve().unwrap();
    user.clone().show(1, &container).unwrap();
    assert_eq!(
        user.avatar().unwrap().image_url(),
        "http://example.com/custom.png"
    );
}
