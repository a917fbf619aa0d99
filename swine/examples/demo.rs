//! Builds a user and an avatar by hand, then through the container, and
//! prints every entity.
//!
//! ```text
//! RUST_LOG=swine=trace cargo run -p swine --example demo
//! ```

use std::sync::Arc;

use swine::rendering::NIL;
use swine::{Avatar, MockAvatar, MockUser, Presentable, User};
use tracing_subscriber::EnvFilter;

fn manual() {
    let user = Arc::new(MockUser::new());
    user.set_username("test001");

    let author: Arc<dyn User> = user.clone();
    let avatar = Arc::new(MockAvatar::with_author(&author));
    avatar.create(None);

    user.set_avatar(Some(avatar.clone()));
    user.create(None);

    println!("User - {user}");
    println!("Avatar - {avatar}");
    println!("----");
}

fn wired() -> swine::Result<()> {
    let container = swine::setup();

    let new_user: Arc<dyn User> = container.resolve_with("test001".to_string())?;

    let new_avatar: Arc<dyn Avatar> = container.resolve_with(new_user.clone())?;
    new_avatar.create(Some(Box::new(|err: Option<&swine::SwineError>| {
        println!("avatar created, error: {err:?}");
    })));

    new_user.set_avatar(Some(new_avatar.clone()));
    new_user.create(None);

    let queried_avatar: Arc<dyn Avatar> = container.resolve()?;
    queried_avatar.clone().show(42, &container)?;

    let queried_user: Arc<dyn User> = container.resolve()?;
    queried_user.clone().show(42, &container)?;

    println!("newUser - {new_user}");
    println!("newAvatar - {new_avatar}");
    println!("queriedAvatar - {queried_avatar}");
    println!("queriedUser - {queried_user}");
    match queried_user.avatar() {
        Some(avatar) => println!("queriedUser's avatar - {avatar}"),
        None => println!("queriedUser's avatar - {NIL}"),
    }
    println!("----");
    Ok(())
}

fn main() -> swine::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("swine=debug")),
        )
        .init();

    manual();
    wired()
}
