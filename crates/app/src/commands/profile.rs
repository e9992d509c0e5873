use lumen_core::model::{validate_name, ProfileId, DEFAULT_AVATAR};
use services::ProfileStore;

use super::{require_active, CliError, CommandResult};

pub async fn create(store: &mut ProfileStore, name: &str, avatar: Option<&str>) -> CommandResult {
    let name = validate_name(name)?;
    let profile = store
        .create_profile(name, avatar.unwrap_or(DEFAULT_AVATAR))
        .await?;
    println!("Created profile {} ({})", profile.name, profile.id);
    Ok(())
}

pub fn list(store: &ProfileStore) {
    if store.profiles().is_empty() {
        println!("No profiles yet.");
        return;
    }
    let active = store.active_profile_id();
    for profile in store.profiles() {
        let marker = if Some(&profile.id) == active { "*" } else { " " };
        println!(
            "{marker} {}  {}  ({} decks, streak {})",
            profile.id,
            profile.name,
            profile.decks.len(),
            profile.stats.streak
        );
    }
}

pub async fn switch(store: &mut ProfileStore, id: ProfileId) -> CommandResult {
    if !store.set_active_profile(Some(id.clone())).await? {
        return Err(CliError::UnknownProfile(id).into());
    }
    if let Some(profile) = store.active_profile() {
        println!("Switched to {}", profile.name);
    }
    Ok(())
}

pub async fn delete(store: &mut ProfileStore, id: &ProfileId) -> CommandResult {
    if !store.delete_profile(id).await? {
        return Err(CliError::UnknownProfile(id.clone()).into());
    }
    println!("Deleted profile {id}");
    Ok(())
}

pub async fn logout(store: &mut ProfileStore) -> CommandResult {
    store.set_active_profile(None).await?;
    println!("Logged out");
    Ok(())
}

pub async fn rename(store: &mut ProfileStore, name: &str, avatar: Option<&str>) -> CommandResult {
    require_active(store)?;
    let name = validate_name(name)?;
    let avatar = match avatar {
        Some(avatar) => avatar.to_owned(),
        None => store
            .active_profile()
            .map_or_else(|| DEFAULT_AVATAR.to_owned(), |p| p.avatar.clone()),
    };
    store.update_profile(name.as_str(), avatar).await?;
    println!("Renamed profile to {name}");
    Ok(())
}
