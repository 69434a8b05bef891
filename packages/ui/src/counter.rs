use api::counter::{format_count, CounterAnimation, TICK_MS};
use dioxus::prelude::*;

use crate::timer::sleep_ms;

/// A statistic that counts up from zero the first time it scrolls into view.
#[component]
pub fn StatCounter(target: u64, label: String, tone: String, duration_ms: u64) -> Element {
    let mut value = use_signal(|| 0u64);
    let mut visible = use_signal(|| false);

    use_effect(move || {
        if !visible() {
            return;
        }
        spawn(async move {
            let mut animation = CounterAnimation::new(target, duration_ms);
            while !animation.is_finished() {
                sleep_ms(TICK_MS).await;
                value.set(animation.tick());
            }
        });
    });

    let observer = use_visibility(visible);

    rsx! {
        div {
            class: "stat-card {tone}",
            onmounted: move |evt| observer.observe(evt),
            div { class: "stat-value", "{format_count(value())}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

/// Flips `visible` once, when at least half of the element is on screen.
#[derive(Clone)]
struct Visibility {
    #[cfg(target_arch = "wasm32")]
    observer: Option<web_sys::IntersectionObserver>,
    visible: Signal<bool>,
}

impl Visibility {
    #[cfg(target_arch = "wasm32")]
    fn observe(&self, evt: MountedEvent) {
        let element = evt.data().downcast::<web_sys::Element>().cloned();
        match (&self.observer, element) {
            (Some(observer), Some(element)) => observer.observe(&element),
            _ => {
                // Without an observer the count starts straight away.
                let mut visible = self.visible;
                visible.set(true);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn observe(&self, _evt: MountedEvent) {
        let mut visible = self.visible;
        visible.set(true);
    }
}

#[cfg(target_arch = "wasm32")]
fn use_visibility(mut visible: Signal<bool>) -> Visibility {
    use std::rc::Rc;

    use api::counter::{VisibilityTrigger, VISIBILITY_THRESHOLD};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    type Callback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

    let (observer, _callback) = use_hook(|| {
        let mut trigger = VisibilityTrigger::new();
        let callback: Rc<Callback> = Rc::new(Closure::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if trigger.observe(entry.intersection_ratio()) {
                        observer.disconnect();
                        visible.set(true);
                        break;
                    }
                }
            },
        ));
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options((*callback).as_ref().unchecked_ref(), &init)
                .ok();
        (observer, callback)
    });

    let on_drop = observer.clone();
    use_drop(move || {
        if let Some(observer) = on_drop {
            observer.disconnect();
        }
    });

    Visibility { observer, visible }
}

#[cfg(not(target_arch = "wasm32"))]
fn use_visibility(visible: Signal<bool>) -> Visibility {
    // Nothing scrolls outside the browser; the count starts at mount.
    Visibility { visible }
}
