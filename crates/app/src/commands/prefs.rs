use services::PreferencesService;

use super::CommandResult;

pub async fn show(prefs: &PreferencesService) -> CommandResult {
    let current = prefs.load().await?;
    println!("language: {}", current.language);
    println!("audio:    {}", if current.audio_enabled { "on" } else { "off" });
    Ok(())
}

pub async fn language(prefs: &PreferencesService, code: &str) -> CommandResult {
    let language = prefs.set_language(code).await?;
    println!("language set to {language}");
    Ok(())
}

pub async fn audio(prefs: &PreferencesService, enabled: bool) -> CommandResult {
    prefs.set_audio_enabled(enabled).await?;
    println!("audio {}", if enabled { "on" } else { "off" });
    Ok(())
}
