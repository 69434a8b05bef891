use api::profile::{load_profile, save_profile, ProfileForm, SAVED_BADGE_MS};
use dioxus::prelude::*;

use super::PageHeader;
use crate::timer::sleep_ms;
use crate::{use_auth, use_backend, use_toasts};

#[component]
pub fn ProfileView() -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let mut toasts = use_toasts();
    let mut draft = use_signal(ProfileForm::default);
    let mut loaded = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut saved = use_signal(|| false);

    let store = backend.store.clone();
    use_hook(move || {
        spawn(async move {
            if let Some(user) = auth.peek().user.clone() {
                draft.set(load_profile(&store, &user).await);
            }
            loaded.set(true);
        });
    });

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let backend = backend.clone();
        async move {
            let Some(user) = auth().user else {
                return;
            };
            saving.set(true);
            let notice = save_profile(&backend.store, &backend.identity, &user, &draft()).await;
            saving.set(false);
            let success = notice.is_success();
            toasts.show(notice);
            if success {
                saved.set(true);
                sleep_ms(SAVED_BADGE_MS).await;
                saved.set(false);
            }
        }
    };

    let Some(user) = auth().user else {
        return rsx! {};
    };
    let current = draft();
    let tags = current.skill_tags();

    rsx! {
        PageHeader { title: "My Profile", subtitle: "How other students see you." }
        if !loaded() {
            p { class: "loading", "Loading profile..." }
        } else {
            div { class: "profile-layout",
                div { class: "card profile-card",
                    div { class: "avatar large", "{current.initials(&user)}" }
                    h2 { "{user.label()}" }
                    if let Some(email) = user.email.as_ref() {
                        p { class: "profile-email", "{email}" }
                    }
                    if !current.bio.trim().is_empty() {
                        p { class: "profile-bio", "{current.bio}" }
                    }
                    div { class: "skill-tags",
                        for tag in tags {
                            span { key: "{tag}", class: "tag", "{tag}" }
                        }
                    }
                }
                form { class: "card form", onsubmit: handle_save,
                    label { r#for: "profile-name", "Display name" }
                    input {
                        id: "profile-name",
                        value: "{current.display_name}",
                        oninput: move |evt: FormEvent| draft.write().display_name = evt.value(),
                    }
                    label { r#for: "profile-bio", "Bio" }
                    textarea {
                        id: "profile-bio",
                        value: "{current.bio}",
                        placeholder: "Tell others what you're into",
                        oninput: move |evt: FormEvent| draft.write().bio = evt.value(),
                    }
                    label { r#for: "profile-skills", "Skills (comma separated)" }
                    input {
                        id: "profile-skills",
                        value: "{current.skills}",
                        placeholder: "Python, Guitar, Figma",
                        oninput: move |evt: FormEvent| draft.write().skills = evt.value(),
                    }
                    button {
                        class: if saved() { "btn btn-saved" } else { "btn btn-primary" },
                        r#type: "submit",
                        disabled: saving(),
                        if saving() {
                            "Saving..."
                        } else if saved() {
                            "Saved!"
                        } else {
                            "Save Profile"
                        }
                    }
                }
            }
        }
    }
}
