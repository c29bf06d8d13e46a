//! DataGrid Navigator entry point
//!
//! Web: renders the dashboard or profile page into the DOM.
//! Native: applies one table action per run and prints the result; table
//! state lives in a JSON file so it carries over between runs.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement};

    use datagrid_navigator::consts::PAGE_SIZE_OPTIONS;
    use datagrid_navigator::platform::http::{load_comments, load_profile};
    use datagrid_navigator::platform::storage::{KeyValueStore, LocalStorage};
    use datagrid_navigator::render::{NO_RESULTS, USER_NOT_FOUND, USER_NOT_FOUND_HINT, truncate};
    use datagrid_navigator::table::{SortKey, TablePage};
    use datagrid_navigator::{MemoryStore, Settings, TableController, User};

    const PROFILE_PATH: &str = "/profile";
    const BODY_WIDTH: usize = 80;

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn create(document: &Document, tag: &str, class: &str) -> Option<Element> {
        let el = document.create_element(tag).ok()?;
        if !class.is_empty() {
            el.set_class_name(class);
        }
        Some(el)
    }

    fn create_text(document: &Document, tag: &str, class: &str, text: &str) -> Option<Element> {
        let el = create(document, tag, class)?;
        el.set_text_content(Some(text));
        Some(el)
    }

    /// Attach a click handler that lives as long as the page
    fn on_click(el: &Element, mut handler: impl FnMut() + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn render_header(document: &Document, on_profile: bool) {
        let Some(header) = document.get_element_by_id("app-header") else {
            return;
        };
        header.set_text_content(None);
        if let Some(title) = create_text(document, "a", "app-title", "DataGrid Navigator") {
            let _ = title.set_attribute("href", "/");
            let _ = header.append_child(&title);
        }
        let (href, label) = if on_profile {
            ("/", "Dashboard")
        } else {
            (PROFILE_PATH, "Profile")
        };
        if let Some(link) = create_text(document, "a", "nav-button", label) {
            let _ = link.set_attribute("href", href);
            let _ = header.append_child(&link);
        }
    }

    /// Static controls: search box and rows-per-page selector
    fn setup_controls(document: &Document, controller: Rc<RefCell<TableController>>) {
        if let Some(input) = document
            .get_element_by_id("search")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let ctrl = controller.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                ctrl.borrow_mut().set_search_term(input_clone.value());
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(select) = document
            .get_element_by_id("page-size")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_text_content(None);
            for size in PAGE_SIZE_OPTIONS {
                if let Some(option) = create_text(document, "option", "", &size.to_string()) {
                    let _ = option.set_attribute("value", &size.to_string());
                    let _ = select.append_child(&option);
                }
            }
            let ctrl = controller.clone();
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                match select_clone.value().parse::<usize>() {
                    Ok(size) => ctrl.borrow_mut().set_page_size(size),
                    Err(e) => log::warn!("Ignoring page size {:?}: {}", select_clone.value(), e),
                }
            });
            let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for (id, forward) in [("prev-page", false), ("next-page", true)] {
            if let Some(button) = document.get_element_by_id(id) {
                let ctrl = controller.clone();
                on_click(&button, move || {
                    let mut c = ctrl.borrow_mut();
                    if forward {
                        c.next_page();
                    } else {
                        c.previous_page();
                    }
                });
            }
        }

        for key in SortKey::ALL {
            if let Some(button) = document.get_element_by_id(&format!("sort-{}", key.as_str())) {
                let ctrl = controller.clone();
                on_click(&button, move || ctrl.borrow_mut().toggle_sort(key));
            }
        }
    }

    /// Redraw rows, sort icons, and pagination footer
    fn render_table(page: &TablePage<'_>) {
        let Some(document) = document() else {
            return;
        };

        if let Some(input) = document
            .get_element_by_id("search")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            if input.value() != page.search_term {
                input.set_value(page.search_term);
            }
        }
        if let Some(select) = document
            .get_element_by_id("page-size")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(&page.summary.page_size.to_string());
        }

        for key in SortKey::ALL {
            if let Some(icon) = document
                .query_selector(&format!("#sort-{} .sort-icon", key.as_str()))
                .ok()
                .flatten()
            {
                icon.set_text_content(Some(page.indicator(key).symbol()));
            }
        }

        if let Some(body) = document.get_element_by_id("rows") {
            body.set_text_content(None);
            if page.is_empty() {
                if let Some(row) = create(&document, "tr", "") {
                    if let Some(cell) = create_text(&document, "td", "empty", NO_RESULTS) {
                        let _ = cell.set_attribute("colspan", "4");
                        let _ = row.append_child(&cell);
                    }
                    let _ = body.append_child(&row);
                }
            }
            for comment in &page.rows {
                let Some(row) = create(&document, "tr", "") else {
                    continue;
                };
                let cells = [
                    ("center", comment.post_id.to_string()),
                    ("name", comment.name.clone()),
                    ("", comment.email.clone()),
                    ("comment", truncate(&comment.body, BODY_WIDTH)),
                ];
                for (class, text) in cells {
                    if let Some(cell) = create_text(&document, "td", class, &text) {
                        let _ = row.append_child(&cell);
                    }
                }
                let _ = body.append_child(&row);
            }
        }

        let summary = &page.summary;
        if let Some(el) = document.get_element_by_id("showing") {
            el.set_text_content(Some(&summary.showing()));
        }
        if let Some(el) = document.get_element_by_id("page-label") {
            el.set_text_content(Some(&summary.page_label()));
        }
        for (id, enabled) in [
            ("prev-page", summary.has_previous()),
            ("next-page", summary.has_next()),
        ] {
            if let Some(button) = document.get_element_by_id(id) {
                if enabled {
                    let _ = button.remove_attribute("disabled");
                } else {
                    let _ = button.set_attribute("disabled", "");
                }
            }
        }
    }

    fn render_profile(document: &Document, user: Option<&User>) {
        let Some(card) = document.get_element_by_id("profile") else {
            return;
        };
        card.set_text_content(None);
        let lines: Vec<(&str, String)> = match user {
            Some(user) => vec![
                ("profile-name", user.name.clone()),
                ("profile-handle", user.handle()),
                ("profile-email", user.email.clone()),
                ("profile-phone", user.phone.clone()),
                ("profile-address", user.address_line()),
                ("profile-company", user.company_line()),
            ],
            None => vec![
                ("profile-name", USER_NOT_FOUND.to_string()),
                ("profile-handle", USER_NOT_FOUND_HINT.to_string()),
            ],
        };
        for (class, text) in lines {
            if let Some(el) = create_text(document, "div", class, &text) {
                let _ = card.append_child(&el);
            }
        }
    }

    fn open_store() -> Rc<dyn KeyValueStore> {
        match LocalStorage::open() {
            Ok(storage) => Rc::new(storage),
            Err(e) => {
                log::error!("{}; table state will not persist", e);
                Rc::new(MemoryStore::new())
            }
        }
    }

    fn show(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", "");
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("DataGrid Navigator starting...");

        let Some(document) = document() else {
            log::error!("No document; nothing to render");
            return;
        };
        let settings = Settings::load();
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        let on_profile = path.trim_end_matches('/') == PROFILE_PATH;
        render_header(&document, on_profile);

        if on_profile {
            let user = load_profile(&settings).await;
            render_profile(&document, user.as_ref());
            show(&document, "profile");
            return;
        }

        let comments = load_comments(&settings).await;
        let controller = Rc::new(RefCell::new(TableController::new(comments, open_store())));
        {
            let mut c = controller.borrow_mut();
            c.subscribe(|page| render_table(page));
            render_table(&c.page());
        }
        setup_controls(&document, controller.clone());
        show(&document, "dashboard");

        // Restore persisted state after the first paint
        wasm_bindgen_futures::spawn_local(async move {
            controller.borrow_mut().rehydrate();
        });

        log::info!("DataGrid Navigator running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::rc::Rc;

    use clap::builder::RangedU64ValueParser;
    use clap::{Parser, Subcommand};
    use datagrid_navigator::platform::http::{load_comments, load_profile};
    use datagrid_navigator::platform::storage::{FileStore, KeyValueStore};
    use datagrid_navigator::render::{render_profile, render_table};
    use datagrid_navigator::table::SortKey;
    use datagrid_navigator::{MemoryStore, Settings, TableController};

    /// Searchable, sortable, paginated comments table with persisted state
    #[derive(Parser, Debug)]
    #[command(
        name = "datagrid-navigator",
        version,
        after_help = "Environment: DATAGRID_API_URL, DATAGRID_STATE_FILE, DATAGRID_TIMEOUT_SECS, RUST_LOG"
    )]
    pub struct Cli {
        #[command(subcommand)]
        pub command: Option<Command>,
    }

    /// One action per invocation
    #[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
    pub enum Command {
        /// Print the current page (default)
        Show,
        /// Filter by name, email, or comment (no TERM clears)
        Search { term: Vec<String> },
        /// Cycle sort on a column: ascending, descending, off
        Sort {
            #[arg(value_parser = parse_sort_key)]
            key: SortKey,
        },
        /// Jump to page N
        Page { page: usize },
        /// Move one page forward
        Next,
        /// Move one page back
        #[command(alias = "previous")]
        Prev,
        /// Rows per page
        PageSize {
            #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
            size: usize,
        },
        /// Print the user profile
        Profile,
    }

    fn parse_sort_key(s: &str) -> Result<SortKey, String> {
        SortKey::parse(s).ok_or_else(|| "expected one of postId, name, email".to_string())
    }

    impl Command {
        pub fn apply(&self, controller: &mut TableController) {
            match self {
                Command::Show | Command::Profile => {}
                Command::Search { term } => controller.set_search_term(term.join(" ")),
                Command::Sort { key } => controller.toggle_sort(*key),
                Command::Page { page } => controller.set_page(*page),
                Command::Next => controller.next_page(),
                Command::Prev => controller.previous_page(),
                Command::PageSize { size } => controller.set_page_size(*size),
            }
        }
    }

    fn open_store(settings: &Settings) -> Rc<dyn KeyValueStore> {
        match FileStore::open(&settings.state_file) {
            Ok(store) => {
                log::debug!("Using state file {}", store.path().display());
                Rc::new(store)
            }
            Err(e) => {
                log::error!(
                    "Cannot open state file {}: {}; state will not persist",
                    settings.state_file.display(),
                    e
                );
                Rc::new(MemoryStore::new())
            }
        }
    }

    pub fn run(cli: Cli) {
        let command = cli.command.unwrap_or(Command::Show);
        let settings = Settings::load();

        if command == Command::Profile {
            print!("{}", render_profile(load_profile(&settings).as_ref()));
            return;
        }

        let comments = load_comments(&settings);
        let mut controller = TableController::new(comments, open_store(&settings));
        controller.rehydrate();
        command.apply(&mut controller);
        print!("{}", render_table(&controller.page()));
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    cli::run(cli::Cli::parse());
}
