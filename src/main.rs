mod activity;
mod config;
mod markup;
mod reconcile;
mod selection;
mod session;
mod sources;
mod tables;
mod workflows;

use anyhow::Context;
use iced::{
    widget::{
        button, checkbox, column, container, horizontal_rule, horizontal_space, row, scrollable,
        text, text_input, text_input::Id, Column, Row,
    },
    alignment, font,
    keyboard::{self, Key},
    event::{self, Event as IcedEvent},
    window, Element, Font, Length, Padding, Subscription, Task, Theme,
};
use tracing_subscriber::EnvFilter;

use crate::activity::Kind;
use crate::reconcile::ToggleOutcome;
use crate::session::{ComposerSession, SelectionChange};
use crate::sources::SourceKind;
use crate::tables::{
    HeaderCheck, LeaseProvision, PrecedentDocument, SelectionTable, SubleasingProvision, TableRow,
};
use crate::workflows::{Workflow, WorkflowTab};

const VAULT_PROJECTS: [&str; 2] = ["Amend v Delta IP Litigation", "Regulatory Compliance Audit"];

const QUICK_SOURCES: [SourceKind; 4] = [
    SourceKind::IManageSearch,
    SourceKind::LexisNexis,
    SourceKind::WebSearch,
    SourceKind::Edgar,
];

const BOLD: Font = Font {
    weight: font::Weight::Bold,
    ..Font::DEFAULT
};

fn main() -> anyhow::Result<()> {
    let (config, load_error) = match config::Config::load() {
        Ok(config) => (config, None),
        Err(e) => (config::Config::default(), Some(e)),
    };
    setup_tracing(&config.logging.filter);
    if let Some(e) = load_error {
        tracing::warn!("{e:#}. Using defaults.");
    }

    let settings = window::Settings {
        size: iced::Size::new(config.window.width as f32, config.window.height as f32),
        min_size: Some(iced::Size::new(
            config.window.min_width as f32,
            config.window.min_height as f32,
        )),
        position: window::Position::Centered,
        ..Default::default()
    };

    iced::application("Assistant", App::update, App::view)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(settings)
        .run_with(move || App::new(config.composer))
        .context("assistant window failed")
}

fn setup_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Panel {
    #[default]
    Workflows,
    Precedents,
    LeaseProvisions,
    Subleasing,
}

impl Panel {
    const ALL: [Panel; 4] = [
        Panel::Workflows,
        Panel::Precedents,
        Panel::LeaseProvisions,
        Panel::Subleasing,
    ];

    fn label(self) -> &'static str {
        match self {
            Panel::Workflows => "Workflows",
            Panel::Precedents => "Precedent documents",
            Panel::LeaseProvisions => "Termination provisions",
            Panel::Subleasing => "Subleasing provisions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableId {
    Precedents,
    Lease,
    Subleasing,
}

#[derive(Debug, Clone)]
enum Message {
    InputChanged(String),
    Submit,
    NewQuery,
    ToggleSourceMenu,
    InspectSource(SourceKind),
    PickSource(SourceKind),
    PickVaultProject(&'static str),
    RemoveSource(String),
    RemoveFile(usize),
    ToggleDeepResearch,
    ConfirmToggle,
    CancelToggle,
    ShowPanel(Panel),
    SelectWorkflowTab(WorkflowTab),
    WorkflowSearchChanged(String),
    ToggleRow(TableId, String),
    ToggleAllRows(TableId),
    Proceed(TableId),
    Escape,
}

struct App {
    session: ComposerSession,
    composer: config::ComposerConfig,
    menu_open: bool,
    inspected: Option<SourceKind>,
    panel: Panel,
    workflow_tab: WorkflowTab,
    workflow_query: String,
    workflows: Vec<Workflow>,
    precedents: SelectionTable<PrecedentDocument>,
    lease: SelectionTable<LeaseProvision>,
    subleasing: SelectionTable<SubleasingProvision>,
    input_id: Id,
}

impl App {
    fn new(composer: config::ComposerConfig) -> (Self, Task<Message>) {
        let input_id = Id::unique();

        let app = App {
            session: ComposerSession::new(),
            composer,
            menu_open: false,
            inspected: None,
            panel: Panel::default(),
            workflow_tab: WorkflowTab::default(),
            workflow_query: String::new(),
            workflows: workflows::catalog(),
            precedents: SelectionTable::new(tables::precedent_documents()),
            lease: SelectionTable::new(tables::lease_provisions()),
            subleasing: SelectionTable::new(tables::subleasing_provisions()),
            input_id: input_id.clone(),
        };

        (app, text_input::focus(input_id))
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => {
                self.session.set_input(value);
            }
            Message::Submit => {
                if let Some(query) = self.session.submit() {
                    activity::log_with(Kind::Submit, format!("Opened chat {}", query.chat_id));
                    self.menu_open = false;
                }
            }
            Message::NewQuery => {
                self.session = ComposerSession::new();
                activity::log("Started a new query");
                return text_input::focus(self.input_id.clone());
            }
            Message::ToggleSourceMenu => {
                self.menu_open = !self.menu_open;
                if !self.menu_open {
                    self.inspected = None;
                }
            }
            Message::InspectSource(kind) => {
                self.inspected = if self.inspected == Some(kind) { None } else { Some(kind) };
            }
            Message::PickSource(kind) => {
                let change = self.session.add_or_toggle_source(kind.menu_label(), kind.id());
                record_change(&change);
            }
            Message::PickVaultProject(project) => {
                let change = self.session.attach_vault_project(project);
                record_change(&change);
            }
            Message::RemoveSource(key) => {
                if self.session.remove_source(&key) {
                    activity::log_with(Kind::Source, format!("Removed {key}"));
                }
            }
            Message::RemoveFile(index) => {
                if let Some(chip) = self.session.remove_file(index) {
                    activity::log_with(Kind::File, format!("Removed {}", chip.display_name()));
                }
            }
            Message::ToggleDeepResearch => match self.session.request_mode_toggle() {
                ToggleOutcome::Applied(mode) => {
                    activity::log_with(Kind::Mode, mode_line(mode.is_deep()));
                }
                ToggleOutcome::AwaitingConfirmation { incompatible } => {
                    self.menu_open = false;
                    activity::log_with(
                        Kind::Mode,
                        format!("{incompatible} selected source(s) block the switch"),
                    );
                }
            },
            Message::ConfirmToggle => {
                if let Some(mode) = self.session.confirm_reconciliation() {
                    activity::log_with(Kind::Mode, mode_line(mode.is_deep()));
                }
            }
            Message::CancelToggle => {
                self.session.cancel_reconciliation();
            }
            Message::ShowPanel(panel) => {
                self.panel = panel;
            }
            Message::SelectWorkflowTab(tab) => {
                self.workflow_tab = tab;
            }
            Message::WorkflowSearchChanged(query) => {
                self.workflow_query = query;
            }
            Message::ToggleRow(table, id) => match table {
                TableId::Precedents => self.precedents.toggle(&id),
                TableId::Lease => self.lease.toggle(&id),
                TableId::Subleasing => self.subleasing.toggle(&id),
            },
            Message::ToggleAllRows(table) => match table {
                TableId::Precedents => self.precedents.toggle_all(),
                TableId::Lease => self.lease.toggle_all(),
                TableId::Subleasing => self.subleasing.toggle_all(),
            },
            Message::Proceed(table) => {
                let picked = match table {
                    TableId::Precedents => self.precedents.proceed().map(|rows| rows.len()),
                    TableId::Lease => self.lease.proceed().map(|rows| rows.len()),
                    TableId::Subleasing => self.subleasing.proceed().map(|rows| rows.len()),
                };
                if let Some(count) = picked {
                    activity::log(format!("Proceeding with {count} selected"));
                }
            }
            Message::Escape => {
                if self.session.pending().is_some() {
                    self.session.cancel_reconciliation();
                } else if self.menu_open {
                    self.menu_open = false;
                    self.inspected = None;
                } else {
                    return iced::exit();
                }
            }
        }
        Task::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _id| {
            if let IcedEvent::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(keyboard::key::Named::Escape),
                ..
            }) = event
            {
                Some(Message::Escape)
            } else {
                None
            }
        })
    }

    fn view(&self) -> Element<Message> {
        let mut content = Column::new()
            .spacing(16)
            .padding(24)
            .max_width(880)
            .push(
                container(text("Harvey").size(28).font(BOLD))
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
            );

        if let Some(query) = self.session.submitted() {
            content = content
                .push(text(format!("Asked: {}", query.text)).size(16))
                .push(text(format!("Chat id: {}", query.chat_id)).size(13))
                .push(button(text("New query")).on_press(Message::NewQuery));
        } else {
            content = content.push(self.composer_view());
            if let Some(prompt) = self.confirmation_view() {
                content = content.push(prompt);
            }
            if self.menu_open {
                content = content.push(self.source_menu_view());
            }
            content = content.push(self.quick_add_view());
        }

        if let Some(entry) = activity::latest() {
            content = content.push(text(format!("{} · {}", kind_label(entry.kind), entry.text)).size(12));
        }

        content = content.push(horizontal_rule(1)).push(self.panel_view());

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .into()
    }

    fn composer_view(&self) -> Element<Message> {
        let width = self.composer.chip_label_width;
        let mut chips = Row::new().spacing(8);
        for entry in self.session.selection().entries() {
            chips = chips.push(chip(
                selection::truncate_label(&entry.label, width),
                Message::RemoveSource(entry.key.clone()),
            ));
        }
        for (index, file) in self.session.files().chips().iter().enumerate() {
            chips = chips.push(chip(
                selection::truncate_label(&file.display_name(), width),
                Message::RemoveFile(index),
            ));
        }

        let input = text_input(&self.composer.placeholder, self.session.input())
            .on_input(Message::InputChanged)
            .on_submit(Message::Submit)
            .padding(12)
            .size(15)
            .id(self.input_id.clone());

        let deep = self.session.mode().is_deep();
        let deep_button = button(text("Deep Research"))
            .on_press(Message::ToggleDeepResearch)
            .style(if deep { button::primary } else { button::secondary });

        let can_send = !self.session.input().trim().is_empty();
        let send = button(text("Ask Harvey").font(BOLD))
            .on_press_maybe(can_send.then_some(Message::Submit))
            .style(button::primary);

        let controls = row![
            button(text("+ Files and sources"))
                .on_press(Message::ToggleSourceMenu)
                .style(button::text),
            horizontal_space(),
            deep_button,
            send,
        ]
        .spacing(8)
        .align_y(alignment::Vertical::Center);

        let mut body = Column::new().spacing(12);
        if !self.session.selection().is_empty() || !self.session.files().is_empty() {
            body = body.push(chips);
        }
        if let Some(project) = self.session.active_vault_project() {
            body = body.push(text(format!("Vault project: {project}")).size(12));
        }
        body = body.push(input).push(controls);

        container(body)
            .padding(Padding::from([16, 12]))
            .width(Length::Fill)
            .style(container::rounded_box)
            .into()
    }

    fn confirmation_view(&self) -> Option<Element<Message>> {
        let message = self.session.pending_message()?;
        let actions = row![
            horizontal_space(),
            button(text("Cancel").size(13))
                .on_press(Message::CancelToggle)
                .style(button::secondary),
            button(text("Remove & Continue").size(13))
                .on_press(Message::ConfirmToggle)
                .style(button::primary),
        ]
        .spacing(8);

        Some(
            container(column![text(message).size(14), actions].spacing(12))
                .padding(12)
                .width(Length::Fill)
                .style(container::bordered_box)
                .into(),
        )
    }

    fn source_menu_view(&self) -> Element<Message> {
        let mut menu = Column::new().spacing(4);
        if self.session.mode().is_deep() {
            menu = menu.push(
                text("Deep Research is enabled. You may select multiple supported sources.").size(12),
            );
        }

        let mut separated = false;
        for kind in SourceKind::ALL {
            if kind.is_research_database() && !separated {
                menu = menu.push(horizontal_rule(1));
                separated = true;
            }
            let annotation = self.session.annotation(kind.id());
            let pick = button(text(kind.menu_label()))
                .on_press_maybe((!annotation.is_incompatible).then_some(Message::PickSource(kind)))
                .style(button::text)
                .width(Length::Fill);
            let info = button(text("?").size(12))
                .on_press(Message::InspectSource(kind))
                .style(button::text);
            menu = menu.push(row![pick, info].align_y(alignment::Vertical::Center));
        }

        let mut layout = Row::new().spacing(16).push(
            container(menu)
                .padding(8)
                .width(Length::FillPortion(2))
                .style(container::bordered_box),
        );
        if let Some(kind) = self.inspected {
            layout = layout.push(self.source_info_view(kind));
        }
        layout.into()
    }

    fn source_info_view(&self, kind: SourceKind) -> Element<Message> {
        let info = kind.info();
        let mut panel = Column::new().spacing(6);

        let annotation = self.session.annotation(kind.id());
        if let Some(reason) = annotation.reason {
            panel = panel.push(
                text(reason)
                    .size(12)
                    .color(iced::Color::from_rgb(0.6, 0.3, 0.05)),
            );
        }
        panel = panel.push(text(info.title).size(14).font(BOLD));

        for line in markup::parse_description(info.description) {
            let mut line_row = Row::new();
            for segment in line {
                let piece = text(segment.text).size(12);
                line_row = line_row.push(if segment.bold { piece.font(BOLD) } else { piece });
            }
            panel = panel.push(line_row);
        }

        container(panel)
            .padding(12)
            .width(Length::FillPortion(3))
            .style(container::bordered_box)
            .into()
    }

    fn quick_add_view(&self) -> Element<Message> {
        let mut quick = Row::new().spacing(8);
        for kind in QUICK_SOURCES {
            let label = if kind == SourceKind::IManageSearch {
                "iManage"
            } else {
                kind.menu_label()
            };
            quick = quick.push(
                button(text(format!("{label} +")).size(13))
                    .on_press(Message::PickSource(kind))
                    .style(button::secondary),
            );
        }
        for project in VAULT_PROJECTS {
            quick = quick.push(
                button(text(format!("{project} +")).size(13))
                    .on_press(Message::PickVaultProject(project))
                    .style(button::secondary),
            );
        }
        container(quick).width(Length::Fill).align_x(alignment::Horizontal::Center).into()
    }

    fn panel_view(&self) -> Element<Message> {
        let mut tabs = Row::new().spacing(4);
        for panel in Panel::ALL {
            tabs = tabs.push(
                button(text(panel.label()).size(14))
                    .on_press(Message::ShowPanel(panel))
                    .style(if panel == self.panel { button::primary } else { button::text }),
            );
        }

        let body = match self.panel {
            Panel::Workflows => self.workflows_view(),
            Panel::Precedents => table_view(&self.precedents, TableId::Precedents, |doc| {
                (doc.title.clone(), doc.notes.clone())
            }),
            Panel::LeaseProvisions => table_view(&self.lease, TableId::Lease, |provision| {
                (
                    provision.topic.clone(),
                    format!("{}\nExamples: {}", provision.notes, provision.example_sources.join(", ")),
                )
            }),
            Panel::Subleasing => table_view(&self.subleasing, TableId::Subleasing, |provision| {
                (provision.agreement.clone(), provision.notes.clone())
            }),
        };

        column![tabs, body].spacing(12).into()
    }

    fn workflows_view(&self) -> Element<Message> {
        let mut tabs = Row::new().spacing(4);
        for tab in WorkflowTab::ALL {
            tabs = tabs.push(
                button(text(tab.label()).size(13))
                    .on_press(Message::SelectWorkflowTab(tab))
                    .style(if tab == self.workflow_tab { button::secondary } else { button::text }),
            );
        }
        let search = text_input("Search workflows", &self.workflow_query)
            .on_input(Message::WorkflowSearchChanged)
            .padding(6)
            .size(14)
            .width(Length::Fixed(300.0));

        let found = workflows::filter(&self.workflows, self.workflow_tab, &self.workflow_query);
        let mut grid = Column::new().spacing(12);
        for chunk in found.chunks(4) {
            let mut line = Row::new().spacing(12);
            for workflow in chunk {
                line = line.push(
                    container(
                        column![
                            text(workflow.title).size(14).font(BOLD),
                            text(workflow.description).size(12),
                            text(format!("{} • {}", workflow.kind.label(), workflow.steps_label())).size(11),
                        ]
                        .spacing(6),
                    )
                    .padding(12)
                    .width(Length::FillPortion(1))
                    .style(container::rounded_box),
                );
            }
            grid = grid.push(line);
        }
        if found.is_empty() {
            grid = grid.push(text("No workflows match your search").size(13));
        }

        column![row![tabs, horizontal_space(), search].align_y(alignment::Vertical::Center), grid]
            .spacing(12)
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn chip(label: String, on_remove: Message) -> Element<'static, Message> {
    container(
        row![
            text(label).size(13),
            button(text("x").size(11)).on_press(on_remove).style(button::text),
        ]
        .spacing(4)
        .align_y(alignment::Vertical::Center),
    )
    .padding(Padding::from([2, 8]))
    .style(container::bordered_box)
    .into()
}

fn table_view<T: TableRow>(
    table: &SelectionTable<T>,
    id: TableId,
    describe: impl Fn(&T) -> (String, String),
) -> Element<'static, Message> {
    let header = match table.header() {
        HeaderCheck::Checked => (true, "Document title"),
        HeaderCheck::Indeterminate => (false, "Document title (some selected)"),
        HeaderCheck::Unchecked => (false, "Document title"),
    };

    let mut rows = Column::new()
        .spacing(8)
        .push(text(table.summary()).size(13))
        .push(checkbox(header.1, header.0).on_toggle(move |_| Message::ToggleAllRows(id)));

    for row_data in table.rows() {
        let (title, notes) = describe(row_data);
        let row_id = row_data.id().to_string();
        rows = rows.push(
            row![
                checkbox(title, table.is_selected(row_data.id()))
                    .on_toggle(move |_| Message::ToggleRow(id, row_id.clone()))
                    .width(Length::FillPortion(2)),
                text(notes).size(12).width(Length::FillPortion(3)),
            ]
            .spacing(12),
        );
    }

    rows = rows.push(
        row![
            text("Selected sources will be used as precedent for drafting").size(12),
            horizontal_space(),
            button(text("Proceed to next step"))
                .on_press_maybe(table.can_proceed().then_some(Message::Proceed(id)))
                .style(button::primary),
        ]
        .align_y(alignment::Vertical::Center),
    );

    container(rows)
        .padding(12)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

fn record_change(change: &SelectionChange) {
    match change {
        SelectionChange::Added(key) => activity::log_with(Kind::Source, format!("Added {key}")),
        SelectionChange::Deselected(key) => activity::log_with(Kind::Source, format!("Removed {key}")),
        SelectionChange::FileAttached(channel) => {
            let chip = selection::FileChip::for_channel(*channel);
            activity::log_with(Kind::File, format!("Attached {}", chip.display_name()));
        }
        SelectionChange::Unchanged => {}
        SelectionChange::Rejected(reason) => activity::log_with(Kind::Source, reason.message()),
    }
}

fn kind_label(kind: Kind) -> &'static str {
    match kind {
        Kind::Info => "info",
        Kind::Source => "sources",
        Kind::File => "files",
        Kind::Mode => "mode",
        Kind::Submit => "chat",
    }
}

fn mode_line(deep: bool) -> &'static str {
    if deep {
        "Deep Research enabled"
    } else {
        "Deep Research disabled"
    }
}
