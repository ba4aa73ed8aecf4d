use gloo_events::{EventListener, EventListenerOptions};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use std::{cell::RefCell, collections::HashMap, rc::Rc};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    console, window, Element, Event, EventTarget, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions,
    Storage,
};
use yew::prelude::*;

use crate::{
    contact::{ContactField, ContactMessage, SubmitStatus},
    content,
    pointer::{closest_interactive, Point},
    scroll_spy::ScrollSample,
    section::{EducationTab, Section, SectionExtent},
    theme::{load_preference, save_preference, PreferenceStorage, Theme},
    transition::{ToggleRect, TransitionVisuals},
    view_state::{TimerKey, ViewAction, ViewEffect, ViewSnapshot, ViewState},
};

const CONTACT_ENDPOINT: &str = "/api/contact";
const DARK_CLASS: &str = "dark";

type PageAction = ViewAction<Element>;

struct BrowserStorage(Storage);

impl PreferenceStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), &'static str> {
        self.0
            .set_item(key, value)
            .map_err(|_| "failed writing to local storage")
    }
}

fn local_storage() -> Option<BrowserStorage> {
    window()?
        .local_storage()
        .ok()
        .flatten()
        .map(BrowserStorage)
}

fn read_stored_preference() -> bool {
    let storage = local_storage();
    load_preference(storage.as_ref().map(|storage| storage as &dyn PreferenceStorage))
}

fn persist_preference(is_dark: bool) {
    let mut storage = local_storage();
    let stored = save_preference(
        storage
            .as_mut()
            .map(|storage| storage as &mut dyn PreferenceStorage),
        is_dark,
    );
    if !stored {
        console::warn_1(&JsValue::from_str("theme preference was not persisted"));
    }
}

fn document_element() -> Option<Element> {
    window()?.document()?.document_element()
}

fn apply_theme(theme: Theme) {
    if let Some(root) = document_element() {
        let _ = root
            .class_list()
            .toggle_with_force(DARK_CLASS, theme.is_dark());
    }
}

fn set_transition_origin(visuals: &TransitionVisuals) {
    let Some(root) = document_element().and_then(|root| root.dyn_into::<HtmlElement>().ok()) else {
        return;
    };

    let style = root.style();
    for (name, value) in visuals.custom_properties() {
        let _ = style.set_property(name, &value);
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn scroll_sample() -> ScrollSample {
    let Some(win) = window() else {
        return ScrollSample {
            offset: 0.0,
            viewport_height: 0.0,
        };
    };

    ScrollSample {
        offset: win.scroll_y().unwrap_or(0.0),
        viewport_height: win
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0),
    }
}

fn section_element(section: Section) -> Option<HtmlElement> {
    let id = section.element_id()?;
    window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn section_extents() -> Vec<(Section, SectionExtent)> {
    Section::TRACKED
        .into_iter()
        .filter_map(|section| {
            let element = section_element(section)?;
            Some((
                section,
                SectionExtent::new(
                    f64::from(element.offset_top()),
                    f64::from(element.offset_height()),
                ),
            ))
        })
        .collect()
}

fn scroll_to_section(section: Section) {
    if section == Section::Home {
        if let Some(win) = window() {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&options);
        }
        return;
    }

    if let Some(element) = section_element(section) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

fn interactive_ancestor(target: Option<EventTarget>) -> Option<Element> {
    let start = target?.dyn_into::<Element>().ok()?;
    let chain = std::iter::successors(Some(start), |element| element.parent_element()).map(
        |element| {
            let tag_name = element.tag_name();
            let class_name = element.get_attribute("class").unwrap_or_default();
            (element, tag_name, class_name)
        },
    );

    closest_interactive(chain)
}

fn pointer_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

async fn deliver_contact(message: &ContactMessage) -> Result<(), String> {
    let response = Request::post(CONTACT_ENDPOINT)
        .json(message)
        .map_err(|error| error.to_string())?
        .send()
        .await
        .map_err(|error| error.to_string())?;

    if response.ok() {
        Ok(())
    } else {
        Err(format!("relay responded with status {}", response.status()))
    }
}

#[derive(Default)]
struct TimerTable {
    torn_down: bool,
    next_generation: u64,
    pending: HashMap<TimerKey, u64>,
}

/// Owns the page state and performs the effects it asks for. Every timer is
/// keyed; a timer only fires if its key still maps to its generation.
#[derive(Clone)]
struct Runtime {
    state: Rc<RefCell<ViewState>>,
    timers: Rc<RefCell<TimerTable>>,
    snapshot: UseStateHandle<ViewSnapshot>,
}

impl Runtime {
    fn dispatch(&self, action: PageAction) {
        if self.timers.borrow().torn_down {
            return;
        }

        let effects = self.state.borrow_mut().dispatch(action);
        for effect in effects {
            self.perform(effect);
        }
        self.snapshot.set(self.state.borrow().snapshot());
    }

    fn perform(&self, effect: ViewEffect<Element>) {
        match effect {
            ViewEffect::Schedule {
                key,
                delay_ms,
                action,
            } => self.schedule(key, delay_ms, action),
            ViewEffect::CancelAllTimers => self.timers.borrow_mut().pending.clear(),
            ViewEffect::SetTransitionOrigin(visuals) => set_transition_origin(&visuals),
            ViewEffect::ApplyTheme(theme) => apply_theme(theme),
            ViewEffect::PersistTheme(is_dark) => persist_preference(is_dark),
            ViewEffect::ScrollTo(section) => scroll_to_section(section),
            ViewEffect::SendContact(message) => {
                let runtime = self.clone();
                spawn_local(async move {
                    let delivered = match deliver_contact(&message).await {
                        Ok(()) => true,
                        Err(error) => {
                            console::error_1(&JsValue::from_str(&format!(
                                "contact message failed: {error}"
                            )));
                            false
                        }
                    };
                    runtime.dispatch(ViewAction::ContactSettled { delivered });
                });
            }
        }
    }

    fn schedule(&self, key: TimerKey, delay_ms: u32, action: PageAction) {
        let generation = {
            let mut timers = self.timers.borrow_mut();
            timers.next_generation = timers.next_generation.wrapping_add(1);
            let generation = timers.next_generation;
            timers.pending.insert(key, generation);
            generation
        };

        let runtime = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;

            let due = {
                let mut timers = runtime.timers.borrow_mut();
                if !timers.torn_down && timers.pending.get(&key) == Some(&generation) {
                    timers.pending.remove(&key);
                    true
                } else {
                    false
                }
            };

            if due {
                runtime.dispatch(action);
            }
        });
    }

    fn teardown(&self) {
        self.dispatch(ViewAction::Teardown);
        let mut timers = self.timers.borrow_mut();
        timers.torn_down = true;
        timers.pending.clear();
    }

    fn install_listeners(&self) -> Vec<EventListener> {
        let mut listeners = Vec::new();
        let Some(win) = window() else {
            return listeners;
        };

        let runtime = self.clone();
        listeners.push(EventListener::new(&win, "scroll", move |_event| {
            runtime.dispatch(ViewAction::Scrolled {
                sample: scroll_sample(),
                extents: section_extents(),
            });
        }));

        let runtime = self.clone();
        listeners.push(EventListener::new(&win, "mousemove", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                runtime.dispatch(ViewAction::PointerMoved(pointer_point(event)));
            }
        }));

        let Some(document) = win.document() else {
            return listeners;
        };
        let runtime = self.clone();
        listeners.push(EventListener::new_with_options(
            &document,
            "mouseenter",
            EventListenerOptions::run_in_capture_phase(),
            move |event: &Event| {
                runtime.dispatch(ViewAction::PointerEntered(interactive_ancestor(event.target())));
            },
        ));

        let runtime = self.clone();
        listeners.push(EventListener::new_with_options(
            &document,
            "mouseleave",
            EventListenerOptions::run_in_capture_phase(),
            move |event: &Event| {
                let to = event
                    .dyn_ref::<MouseEvent>()
                    .and_then(|event| interactive_ancestor(event.related_target()));
                runtime.dispatch(ViewAction::PointerLeft {
                    from: interactive_ancestor(event.target()),
                    to,
                });
            },
        ));

        listeners
    }
}

#[derive(Properties, PartialEq)]
struct NavigationProps {
    active: Section,
    on_navigate: Callback<Section>,
}

#[function_component(Navigation)]
fn navigation(props: &NavigationProps) -> Html {
    html! {
        <nav class="section-nav">
            <ul>
                { for Section::nav_items().map(|section| {
                    let on_navigate = props.on_navigate.clone();
                    let onclick = Callback::from(move |event: MouseEvent| {
                        event.prevent_default();
                        on_navigate.emit(section);
                    });
                    html! {
                        <li>
                            <button
                                type="button"
                                class={classes!("nav-item", (props.active == section).then_some("is-active"))}
                                aria-current={(props.active == section).then_some("true")}
                                {onclick}
                            >
                                {section.label()}
                            </button>
                        </li>
                    }
                }) }
            </ul>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
struct CursorProps {
    primary: Point,
    trailing: Point,
    hovering: bool,
}

#[function_component(CustomCursor)]
fn custom_cursor(props: &CursorProps) -> Html {
    let ring_style = format!(
        "left: {:.1}px; top: {:.1}px;",
        props.primary.x, props.primary.y
    );
    let dot_style = format!(
        "left: {:.1}px; top: {:.1}px;",
        props.trailing.x, props.trailing.y
    );

    html! {
        <>
            <div class={classes!("custom-cursor", props.hovering.then_some("hover"))} style={ring_style} aria-hidden="true" />
            <div class="custom-cursor-dot" style={dot_style} aria-hidden="true" />
        </>
    }
}

#[derive(Properties, PartialEq)]
struct TransitionLayerProps {
    visuals: Option<TransitionVisuals>,
}

#[function_component(ThemeTransitionLayer)]
fn theme_transition_layer(props: &TransitionLayerProps) -> Html {
    let Some(visuals) = props.visuals.as_ref() else {
        return Html::default();
    };

    let mask_style = visuals.mask_style();
    let overlay_style = visuals.overlay_style();

    html! {
        <>
            <div class="theme-mask" style={mask_style} aria-hidden="true" />
            <div class="theme-overlay" style={overlay_style} aria-hidden="true" />
        </>
    }
}

#[function_component(HeroHeader)]
fn hero_header() -> Html {
    html! {
        <header class="hero">
            <p class="hero-name">
                <span class="header-name">{content::OWNER_NAME}</span>
                <br />
                <span class="header-name hero-surname">{content::OWNER_SURNAME}</span>
            </p>
            <p class="hero-role">{content::ROLE}</p>
            <div class="hero-meta">
                <span>{"📍 "}{content::LOCATION}</span>
                <span>{"✉️ "}{content::CONTACT_EMAIL}</span>
            </div>
            <p class="hero-summary">{content::SUMMARY}</p>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct AboutProps {
    on_preview: Callback<Option<Point>>,
}

#[function_component(AboutSection)]
fn about_section(props: &AboutProps) -> Html {
    let onmouseenter = {
        let on_preview = props.on_preview.clone();
        Callback::from(move |event: MouseEvent| on_preview.emit(Some(pointer_point(&event))))
    };
    let onmouseleave = {
        let on_preview = props.on_preview.clone();
        Callback::from(move |_| on_preview.emit(None))
    };

    html! {
        <section id="about" class="section-block">
            <h2>{"About Me"}</h2>
            <div class="about-copy">
                <p><strong>{"BS Information Technology (Full-Stack)"}</strong></p>
                <p>{"Saint Mary's University, Bayombong"}</p>
                <p class="thesis" {onmouseenter} {onmouseleave}>
                    <strong>{"Thesis:"}</strong>{" "}{content::THESIS_TITLE}
                </p>
                <p>
                    {"Passionate about web applications, mobile development, and system architecture. I focus on creating scalable, user-friendly solutions using modern technologies and best practices."}
                </p>
            </div>
        </section>
    }
}

#[function_component(SkillsSection)]
fn skills_section() -> Html {
    html! {
        <section id="skills" class="section-block">
            <div class="skill-grid">
                { for content::SKILLS.iter().map(|skill| html! {
                    <div class="skill-card" key={skill.name}>
                        <span class="skill-glyph" aria-hidden="true">{skill.glyph}</span>
                        <h3>{skill.name}</h3>
                        <p>{skill.description}</p>
                    </div>
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct EducationProps {
    tab: EducationTab,
    on_select: Callback<EducationTab>,
}

#[function_component(EducationSection)]
fn education_section(props: &EducationProps) -> Html {
    let tab_button = |tab: EducationTab| {
        let on_select = props.on_select.clone();
        html! {
            <button
                type="button"
                class={classes!("tab", (props.tab == tab).then_some("is-active"))}
                onclick={Callback::from(move |_| on_select.emit(tab))}
            >
                {tab.title().to_uppercase()}
            </button>
        }
    };

    html! {
        <section id="education" class="section-block">
            <h2>{props.tab.title()}</h2>
            <div class="tabs">
                {tab_button(EducationTab::Education)}
                {tab_button(EducationTab::Seminar)}
            </div>
            <ol class="timeline" key={props.tab.title()}>
                { for content::timeline(props.tab).iter().enumerate().map(|(index, entry)| html! {
                    <li class={classes!("timeline-item", if index % 2 == 0 { "left" } else { "right" })}>
                        <div class="timeline-card">
                            <h3>{entry.title}</h3>
                            <p>{entry.detail}</p>
                        </div>
                        <span class="timeline-dot" aria-hidden="true" />
                    </li>
                }) }
            </ol>
        </section>
    }
}

#[function_component(ProjectsSection)]
fn projects_section() -> Html {
    html! {
        <section id="projects" class="section-block">
            <h2>{"Projects"}</h2>
            <div class="project-list">
                { for content::PROJECTS.iter().map(|project| html! {
                    <article class="project-card" key={project.name}>
                        <h3>{project.name}</h3>
                        <ul class="stack">
                            { for project.stack.iter().map(|tech| html! { <li>{*tech}</li> }) }
                        </ul>
                        { for project.role.map(|role| html! { <p class="role">{"Role: "}{role}</p> }) }
                        <p>{project.summary}</p>
                    </article>
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ContactProps {
    fields: ContactMessage,
    status: SubmitStatus,
    error: Option<&'static str>,
    on_edit: Callback<(ContactField, String)>,
    on_submit: Callback<()>,
}

#[function_component(ContactSection)]
fn contact_section(props: &ContactProps) -> Html {
    let input_handler = |field: ContactField| {
        let on_edit = props.on_edit.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_edit.emit((field, input.value()));
        })
    };
    let onmessage = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlTextAreaElement = event.target_unchecked_into();
            on_edit.emit((ContactField::Message, input.value()));
        })
    };
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_submit.emit(());
        })
    };
    let submitting = props.status == SubmitStatus::Submitting;

    html! {
        <section id="contact" class="section-block contact">
            <h2>{"Get In Touch"}</h2>
            <p>{"Have a question or want to work together? Send me a message and I'll get back to you as soon as possible."}</p>
            <ul class="social-links">
                { for content::SOCIAL_LINKS.iter().map(|link| html! {
                    <li>
                        <a
                            href={link.href}
                            target={link.external.then_some("_blank")}
                            rel={link.external.then_some("noreferrer")}
                            aria-label={link.label}
                        >
                            {link.label}
                        </a>
                    </li>
                }) }
            </ul>
            <form class="contact-form" {onsubmit}>
                <label for="name">{"Name"}</label>
                <input id="name" name="name" type="text" required={true} value={props.fields.name.clone()} oninput={input_handler(ContactField::Name)} />
                <label for="email">{"Email"}</label>
                <input id="email" name="email" type="email" required={true} value={props.fields.email.clone()} oninput={input_handler(ContactField::Email)} />
                <label for="message">{"Message"}</label>
                <textarea id="message" name="message" rows="5" required={true} value={props.fields.message.clone()} oninput={onmessage} />
                <button type="submit" disabled={submitting}>
                    { if submitting { "Sending..." } else { "Send Message" } }
                </button>
                { for props.status.notice().map(|notice| html! {
                    <p class={classes!("form-status", (props.status == SubmitStatus::Failed).then_some("is-error"))} role="status">
                        {props.error.unwrap_or(notice)}
                    </p>
                }) }
            </form>
        </section>
    }
}

#[function_component(App)]
fn app() -> Html {
    let state = use_mut_ref(|| ViewState::new(read_stored_preference()));
    let timers = use_mut_ref(TimerTable::default);
    let snapshot = {
        let state = state.clone();
        use_state(move || state.borrow().snapshot())
    };
    let toggle_ref = use_node_ref();

    let runtime = Runtime {
        state,
        timers,
        snapshot: snapshot.clone(),
    };

    {
        let runtime = runtime.clone();
        use_effect_with((), move |_| {
            runtime.dispatch(ViewAction::Mounted {
                sample: scroll_sample(),
                extents: section_extents(),
            });
            let listeners = runtime.install_listeners();
            move || {
                drop(listeners);
                runtime.teardown();
            }
        });
    }

    let on_toggle = {
        let runtime = runtime.clone();
        let toggle_ref = toggle_ref.clone();
        Callback::from(move |_| {
            let Some(toggle) = toggle_ref.cast::<Element>() else {
                return;
            };
            let rect = toggle.get_bounding_client_rect();
            runtime.dispatch(ViewAction::ThemeToggled {
                toggle: ToggleRect {
                    top: rect.top(),
                    left: rect.left(),
                    width: rect.width(),
                    height: rect.height(),
                },
                reduced_motion: prefers_reduced_motion(),
            });
        })
    };

    let on_navigate = {
        let runtime = runtime.clone();
        Callback::from(move |section: Section| runtime.dispatch(ViewAction::Navigate(section)))
    };

    let on_brand = on_navigate.reform(|_: MouseEvent| Section::Home);

    let on_menu = {
        let runtime = runtime.clone();
        Callback::from(move |_| runtime.dispatch(ViewAction::MobileMenuToggled))
    };

    let on_preview = {
        let runtime = runtime.clone();
        Callback::from(move |at: Option<Point>| {
            runtime.dispatch(match at {
                Some(at) => ViewAction::PreviewEntered(at),
                None => ViewAction::PreviewLeft,
            })
        })
    };

    let on_tab = {
        let runtime = runtime.clone();
        Callback::from(move |tab: EducationTab| {
            runtime.dispatch(ViewAction::EducationTabSelected(tab))
        })
    };

    let on_edit = {
        let runtime = runtime.clone();
        Callback::from(move |(field, value): (ContactField, String)| {
            runtime.dispatch(ViewAction::ContactEdited(field, value))
        })
    };

    let on_submit = {
        let runtime = runtime.clone();
        Callback::from(move |_| runtime.dispatch(ViewAction::ContactSubmitted))
    };

    let view = (*snapshot).clone();
    let theme = view.theme;
    let content_style = format!("opacity: {:.3};", view.content_opacity());
    let preview_style = view
        .preview_position
        .map(|at| format!("left: {:.1}px; top: {:.1}px;", at.x, at.y));

    html! {
        <div class={classes!("page", theme.is_dark().then_some(DARK_CLASS))}>
            <div class="floating-dots" aria-hidden="true" />
            <CustomCursor
                primary={view.pointer.primary}
                trailing={view.pointer.trailing}
                hovering={view.pointer.hovering}
            />
            <ThemeTransitionLayer visuals={view.transition.clone()} />

            <nav class="top-bar">
                <button class="brand" type="button" onclick={on_brand}>
                    {content::BRAND}
                </button>
                <button
                    class="menu-toggle"
                    type="button"
                    aria-expanded={view.mobile_menu_open.to_string()}
                    aria-label="Toggle navigation"
                    onclick={on_menu}
                >
                    {"☰"}
                </button>
                <div class={classes!("nav-panel", view.mobile_menu_open.then_some("is-open"))}>
                    <Navigation active={view.scroll.active} on_navigate={on_navigate} />
                </div>
                <button
                    ref={toggle_ref}
                    class="theme-toggle"
                    type="button"
                    title={theme.toggle_title()}
                    aria-pressed={theme.is_dark().to_string()}
                    onclick={on_toggle}
                >
                    <span aria-hidden="true">{theme.icon()}</span>
                </button>
            </nav>

            <div class="hero-backdrop">
                <HeroHeader />
            </div>

            <main class="content" style={content_style}>
                <div class="content-inner">
                    <AboutSection on_preview={on_preview} />
                    <SkillsSection />
                    <EducationSection tab={view.education_tab} on_select={on_tab} />
                    <ProjectsSection />
                    <ContactSection
                        fields={view.contact.fields.clone()}
                        status={view.contact.status}
                        error={view.contact.error}
                        on_edit={on_edit}
                        on_submit={on_submit}
                    />
                </div>
            </main>

            { for preview_style.map(|style| html! {
                <div class="hover-preview" {style} aria-hidden="true">
                    <img src={content::THESIS_PREVIEW_IMAGE} alt="Logo" />
                </div>
            }) }
        </div>
    }
}

pub fn run() {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
    else {
        console::error_1(&JsValue::from_str("missing #app mount point"));
        return;
    };

    yew::Renderer::<App>::with_root(root).render();
}
