use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::core::{Action, ExportFormat, NavigateTarget, NotifyLevel};
use crate::domain::fields::{FieldNode, FieldRow};
use crate::domain::records::{
    sort_records, BlockRecord, ContractRecord, MonitorRecord, NameRecord, TxRecord,
};
use crate::domain::sort::{
    all_sort_fields, handle_field_click, single_field, sort_info, SortDirection, SortInfo,
    SortSpec,
};
use crate::domain::units::{format_ether, format_gwei, format_wei};
use crate::infrastructure::backend::Snapshot;
use crate::store::{short_hex, DisplayCache, ViewState};

/// Sections of the explorer, one sortable table each
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Blocks,
    Transactions,
    Contracts,
    Monitors,
    Names,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Blocks,
        Section::Transactions,
        Section::Contracts,
        Section::Monitors,
        Section::Names,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Blocks => "Blocks",
            Section::Transactions => "Transactions",
            Section::Contracts => "Contracts",
            Section::Monitors => "Monitors",
            Section::Names => "Names",
        }
    }

    /// Stable identifier used in config and persisted view state.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Blocks => "blocks",
            Section::Transactions => "transactions",
            Section::Contracts => "contracts",
            Section::Monitors => "monitors",
            Section::Names => "names",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Section::Blocks => '1',
            Section::Transactions => '2',
            Section::Contracts => '3',
            Section::Monitors => '4',
            Section::Names => '5',
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            Section::Blocks => &[
                Column { field: "number", label: "Number", width: 12 },
                Column { field: "time", label: "Time", width: 10 },
                Column { field: "txs", label: "Txs", width: 6 },
                Column { field: "gas_used", label: "Gas Used", width: 12 },
                Column { field: "base_fee", label: "Base Fee", width: 12 },
                Column { field: "miner", label: "Miner", width: 16 },
            ],
            Section::Transactions => &[
                Column { field: "hash", label: "Hash", width: 16 },
                Column { field: "block", label: "Block", width: 12 },
                Column { field: "from", label: "From", width: 16 },
                Column { field: "to", label: "To", width: 16 },
                Column { field: "value", label: "Value", width: 14 },
                Column { field: "gas", label: "Gas", width: 10 },
                Column { field: "status", label: "Status", width: 9 },
            ],
            Section::Contracts => &[
                Column { field: "name", label: "Name", width: 20 },
                Column { field: "address", label: "Address", width: 16 },
                Column { field: "deployed", label: "Deployed", width: 12 },
                Column { field: "txs", label: "Txs", width: 12 },
                Column { field: "balance", label: "Balance", width: 14 },
                Column { field: "verified", label: "Verified", width: 10 },
            ],
            Section::Monitors => &[
                Column { field: "name", label: "Name", width: 16 },
                Column { field: "address", label: "Address", width: 16 },
                Column { field: "last_seen", label: "Last Seen", width: 20 },
                Column { field: "events", label: "Events", width: 9 },
                Column { field: "enabled", label: "Enabled", width: 9 },
            ],
            Section::Names => &[
                Column { field: "name", label: "Name", width: 24 },
                Column { field: "address", label: "Address", width: 16 },
                Column { field: "registered", label: "Registered", width: 20 },
                Column { field: "expires", label: "Expires", width: 20 },
            ],
        }
    }
}

/// One table column: the sort field it clicks through, plus presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub label: &'static str,
    pub width: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// Per-section cursor state
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    pub row: usize,
    pub column: usize,
}

pub struct App {
    pub active_section: Section,
    pub input_mode: InputMode,
    pub command_buffer: String,

    pub blocks: Vec<BlockRecord>,
    pub txs: Vec<TxRecord>,
    pub contracts: Vec<ContractRecord>,
    pub monitors: Vec<MonitorRecord>,
    pub names: Vec<NameRecord>,

    sorts: BTreeMap<Section, SortSpec>,
    cursors: BTreeMap<Section, Cursor>,

    pub view_state: ViewState,
    pub status: Option<StatusMessage>,
    pub source: String,
    pub loading: bool,
    pub display_cache: DisplayCache,
    pub should_quit: bool,
}

impl App {
    /// Build the app from config defaults overridden by persisted view state.
    pub fn new(config: &Config, view_state: ViewState) -> Self {
        let mut sorts = BTreeMap::new();
        for section in Section::ALL {
            let spec = view_state
                .sort_for(section.id())
                .cloned()
                .or_else(|| config.default_sort_for(section.id()));
            if let Some(spec) = spec {
                sorts.insert(section, spec);
            }
        }

        Self {
            active_section: Section::Blocks,
            input_mode: InputMode::Normal,
            command_buffer: String::new(),
            blocks: Vec::new(),
            txs: Vec::new(),
            contracts: Vec::new(),
            monitors: Vec::new(),
            names: Vec::new(),
            sorts,
            cursors: BTreeMap::new(),
            view_state,
            status: None,
            source: String::new(),
            loading: true,
            display_cache: DisplayCache::new(512),
            should_quit: false,
        }
    }

    // --- snapshot ---

    pub fn apply_snapshot(&mut self, source: String, snapshot: Snapshot) {
        self.blocks = snapshot.blocks;
        self.txs = snapshot.transactions;
        self.contracts = snapshot.contracts;
        self.monitors = snapshot.monitors;
        self.names = snapshot.names;
        self.source = source;
        self.loading = false;
        for section in Section::ALL {
            self.resort(section);
            self.clamp_cursor(section);
        }
    }

    pub fn row_count(&self, section: Section) -> usize {
        match section {
            Section::Blocks => self.blocks.len(),
            Section::Transactions => self.txs.len(),
            Section::Contracts => self.contracts.len(),
            Section::Monitors => self.monitors.len(),
            Section::Names => self.names.len(),
        }
    }

    // --- sorting ---

    pub fn sort_for(&self, section: Section) -> SortSpec {
        self.sorts.get(&section).cloned().unwrap_or_default()
    }

    pub fn sort_info_for(&self, section: Section, field: &str) -> SortInfo {
        match self.sorts.get(&section) {
            Some(spec) => sort_info(spec, field),
            None => sort_info(&SortSpec::empty(), field),
        }
    }

    /// Route a header click on `field` through the sort transition and
    /// re-sort the section.
    pub fn click_field(&mut self, field: &str) {
        let section = self.active_section;
        let next = handle_field_click(&self.sort_for(section), field);
        self.store_sort(section, next);
    }

    /// Header click resolved by column index (mouse or keyboard cursor).
    pub fn click_column(&mut self, index: usize) {
        let columns = self.active_section.columns();
        if let Some(column) = columns.get(index) {
            let field = column.field;
            self.click_field(field);
        }
    }

    pub fn set_sort(&mut self, field: &str, direction: Option<SortDirection>) {
        let section = self.active_section;
        match direction {
            Some(direction) => self.store_sort(section, single_field(field, direction)),
            // `:sort <field>` without a direction behaves like a click
            None => self.click_field(field),
        }
    }

    pub fn clear_sort(&mut self) {
        let section = self.active_section;
        self.store_sort(section, SortSpec::empty());
    }

    fn store_sort(&mut self, section: Section, spec: SortSpec) {
        self.view_state.set_sort(section.id(), spec.clone());
        if spec.is_empty_sort() {
            self.sorts.remove(&section);
        } else {
            self.sorts.insert(section, spec);
        }
        self.resort(section);
    }

    fn resort(&mut self, section: Section) {
        let spec = self.sort_for(section);
        match section {
            Section::Blocks => sort_records(&mut self.blocks, &spec),
            Section::Transactions => sort_records(&mut self.txs, &spec),
            Section::Contracts => sort_records(&mut self.contracts, &spec),
            Section::Monitors => sort_records(&mut self.monitors, &spec),
            Section::Names => sort_records(&mut self.names, &spec),
        }
    }

    /// Status-line summary such as `value▼ › block▲`.
    pub fn sort_summary(&self) -> Option<String> {
        let spec = self.sorts.get(&self.active_section)?;
        let parts: Vec<String> = all_sort_fields(spec)
            .into_iter()
            .map(|ranked| {
                let arrow = if ranked.direction.is_ascending() { "▲" } else { "▼" };
                format!("{}{arrow}", ranked.field)
            })
            .collect();
        Some(parts.join(" › "))
    }

    // --- navigation ---

    pub fn navigate(&mut self, target: NavigateTarget) {
        self.active_section = match target {
            NavigateTarget::Blocks => Section::Blocks,
            NavigateTarget::Transactions => Section::Transactions,
            NavigateTarget::Contracts => Section::Contracts,
            NavigateTarget::Monitors => Section::Monitors,
            NavigateTarget::Names => Section::Names,
        };
    }

    pub fn next_section(&mut self) {
        let idx = Section::ALL
            .iter()
            .position(|s| *s == self.active_section)
            .unwrap_or(0);
        self.active_section = Section::ALL[(idx + 1) % Section::ALL.len()];
    }

    pub fn cursor(&self, section: Section) -> Cursor {
        self.cursors.get(&section).copied().unwrap_or_default()
    }

    pub fn move_row(&mut self, delta: i64) {
        let section = self.active_section;
        let count = self.row_count(section);
        let cursor = self.cursors.entry(section).or_default();
        if count == 0 {
            cursor.row = 0;
            return;
        }
        let row = cursor.row as i64 + delta;
        cursor.row = row.clamp(0, count as i64 - 1) as usize;
    }

    pub fn move_column(&mut self, delta: i64) {
        let section = self.active_section;
        let columns = section.columns().len() as i64;
        let cursor = self.cursors.entry(section).or_default();
        let column = cursor.column as i64 + delta;
        cursor.column = column.rem_euclid(columns) as usize;
    }

    fn clamp_cursor(&mut self, section: Section) {
        let count = self.row_count(section);
        let cursor = self.cursors.entry(section).or_default();
        if count == 0 {
            cursor.row = 0;
        } else if cursor.row >= count {
            cursor.row = count - 1;
        }
    }

    // --- status ---

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(4) {
                self.status = None;
            }
        }
    }

    // --- actions ---

    pub fn apply_action(&mut self, action: Action) -> Option<AppRequest> {
        match action {
            Action::None => None,
            Action::Navigate(target) => {
                self.navigate(target);
                None
            }
            Action::SetSort { field, direction } => {
                self.set_sort(&field, direction);
                None
            }
            Action::ClearSort => {
                self.clear_sort();
                self.set_status("Sort cleared", StatusLevel::Info);
                None
            }
            Action::Export { format, path } => Some(AppRequest::Export {
                format,
                path: Some(path),
            }),
            Action::Reload => Some(AppRequest::Reload),
            Action::Notify(text, level) => {
                self.set_status(text, level.into());
                None
            }
            Action::Quit => {
                self.should_quit = true;
                None
            }
        }
    }

    // --- detail panel ---

    /// Field rows for the record under the cursor, or an empty list.
    pub fn detail_rows(&self) -> Vec<FieldRow> {
        let section = self.active_section;
        let row = self.cursor(section).row;
        let tree = detail_tree(section);
        let values = self.detail_values(section, row);
        crate::domain::fields::preprocess(&tree, &|id| values.get(id).cloned())
    }

    fn detail_values(&self, section: Section, row: usize) -> BTreeMap<&'static str, String> {
        let mut values = BTreeMap::new();
        match section {
            Section::Blocks => {
                let Some(block) = self.blocks.get(row).cloned() else {
                    return values;
                };
                values.insert("number", block.number.to_string());
                values.insert("time", block.timestamp.to_rfc3339());
                values.insert("txs", block.tx_count.to_string());
                values.insert("gas_used", format_wei(alloy_primitives::U256::from(block.gas_used)));
                values.insert("base_fee", format!("{} gwei", format_gwei(block.base_fee_wei)));
                values.insert("miner", block.miner);
            }
            Section::Transactions => {
                let Some(tx) = self.txs.get(row).cloned() else {
                    return values;
                };
                values.insert("hash", tx.hash);
                values.insert("block", tx.block_number.to_string());
                values.insert("from", tx.from);
                values.insert("to", tx.to.unwrap_or_default());
                values.insert("value", format!("{} ether", format_ether(tx.value_wei)));
                values.insert("gas", tx.gas_used.to_string());
                values.insert("status", tx.status.label().to_string());
                values.insert("method", tx.method.unwrap_or_default());
            }
            Section::Contracts => {
                let Some(contract) = self.contracts.get(row).cloned() else {
                    return values;
                };
                values.insert("name", contract.name);
                values.insert("address", contract.address);
                values.insert("deployed", contract.deployed_block.to_string());
                values.insert("txs", contract.tx_count.to_string());
                values.insert(
                    "balance",
                    format!("{} ether", format_ether(contract.balance_wei)),
                );
                values.insert("verified", if contract.verified { "yes" } else { "no" }.to_string());
            }
            Section::Monitors => {
                let Some(monitor) = self.monitors.get(row).cloned() else {
                    return values;
                };
                values.insert("name", monitor.name);
                values.insert("address", monitor.address);
                values.insert("last_seen", monitor.last_seen.to_rfc3339());
                values.insert("events", monitor.event_count.to_string());
                values.insert("enabled", if monitor.enabled { "yes" } else { "no" }.to_string());
            }
            Section::Names => {
                let Some(name) = self.names.get(row).cloned() else {
                    return values;
                };
                values.insert("name", name.name);
                values.insert("address", name.address);
                values.insert("registered", name.registered.to_rfc3339());
                values.insert(
                    "expires",
                    name.expires.map(|t| t.to_rfc3339()).unwrap_or_default(),
                );
            }
        }
        values
    }

    /// Shortened hash/address via the bounded display memo.
    pub fn short_display(&mut self, value: &str) -> String {
        self.display_cache
            .get_or_insert_with(value, || short_hex(value))
    }
}

/// Requests the main loop must service outside of `App` (worker, filesystem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRequest {
    Reload,
    Export {
        format: ExportFormat,
        path: Option<std::path::PathBuf>,
    },
}

fn detail_tree(section: Section) -> Vec<FieldNode> {
    match section {
        Section::Blocks => vec![
            FieldNode::leaf("number", "Number"),
            FieldNode::leaf("time", "Time"),
            FieldNode::group(
                "Execution",
                vec![
                    FieldNode::leaf("txs", "Transactions"),
                    FieldNode::leaf("gas_used", "Gas Used"),
                    FieldNode::leaf("base_fee", "Base Fee"),
                ],
            ),
            FieldNode::leaf("miner", "Miner"),
        ],
        Section::Transactions => vec![
            FieldNode::leaf("hash", "Hash"),
            FieldNode::leaf("block", "Block"),
            FieldNode::group(
                "Parties",
                vec![FieldNode::leaf("from", "From"), FieldNode::optional("to", "To")],
            ),
            FieldNode::group(
                "Execution",
                vec![
                    FieldNode::leaf("value", "Value"),
                    FieldNode::leaf("gas", "Gas"),
                    FieldNode::leaf("status", "Status"),
                    FieldNode::optional("method", "Method"),
                ],
            ),
        ],
        Section::Contracts => vec![
            FieldNode::leaf("name", "Name"),
            FieldNode::leaf("address", "Address"),
            FieldNode::group(
                "Activity",
                vec![
                    FieldNode::leaf("deployed", "Deployed Block"),
                    FieldNode::leaf("txs", "Transactions"),
                    FieldNode::leaf("balance", "Balance"),
                ],
            ),
            FieldNode::leaf("verified", "Verified"),
        ],
        Section::Monitors => vec![
            FieldNode::leaf("name", "Name"),
            FieldNode::leaf("address", "Address"),
            FieldNode::group(
                "Activity",
                vec![
                    FieldNode::leaf("last_seen", "Last Seen"),
                    FieldNode::leaf("events", "Events"),
                ],
            ),
            FieldNode::leaf("enabled", "Enabled"),
        ],
        Section::Names => vec![
            FieldNode::leaf("name", "Name"),
            FieldNode::leaf("address", "Address"),
            FieldNode::group(
                "Registration",
                vec![
                    FieldNode::leaf("registered", "Registered"),
                    FieldNode::optional("expires", "Expires"),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::backend::fixture_snapshot;

    fn app_with_fixture() -> App {
        let mut app = App::new(&Config::default(), ViewState::default());
        app.apply_snapshot("fixture".into(), fixture_snapshot());
        app
    }

    #[test]
    fn test_click_field_sorts_rows() {
        let mut app = app_with_fixture();
        app.active_section = Section::Blocks;
        app.click_field("number");
        let numbers: Vec<u64> = app.blocks.iter().map(|b| b.number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);

        app.click_field("number");
        let numbers: Vec<u64> = app.blocks.iter().map(|b| b.number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn test_click_column_uses_active_section_columns() {
        let mut app = app_with_fixture();
        app.active_section = Section::Transactions;
        // column 4 of Transactions is "value"
        app.click_column(4);
        let spec = app.sort_for(Section::Transactions);
        assert_eq!(spec.fields, vec!["value"]);
        assert_eq!(spec.orders, vec![true]);
    }

    #[test]
    fn test_sorts_are_per_section() {
        let mut app = app_with_fixture();
        app.active_section = Section::Blocks;
        app.click_field("gas_used");
        app.active_section = Section::Names;
        app.click_field("name");
        assert_eq!(app.sort_for(Section::Blocks).fields, vec!["gas_used"]);
        assert_eq!(app.sort_for(Section::Names).fields, vec!["name"]);
    }

    #[test]
    fn test_view_state_follows_sort_changes() {
        let mut app = app_with_fixture();
        app.active_section = Section::Contracts;
        app.click_field("balance");
        assert_eq!(
            app.view_state.sort_for("contracts").unwrap().fields,
            vec!["balance"]
        );
        app.clear_sort();
        assert!(app.view_state.sort_for("contracts").is_none());
    }

    #[test]
    fn test_config_default_sort_applied() {
        let config: Config = toml::from_str(
            r#"
            [sorts]
            blocks = [{ field = "number", direction = "desc" }]
        "#,
        )
        .unwrap();
        let mut app = App::new(&config, ViewState::default());
        app.apply_snapshot("fixture".into(), fixture_snapshot());
        let numbers: Vec<u64> = app.blocks.iter().map(|b| b.number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn test_persisted_state_wins_over_config() {
        let config: Config = toml::from_str(
            r#"
            [sorts]
            blocks = [{ field = "number", direction = "desc" }]
        "#,
        )
        .unwrap();
        let mut state = ViewState::default();
        state.set_sort("blocks", single_field("gas_used", SortDirection::Asc));
        let app = App::new(&config, state);
        assert_eq!(app.sort_for(Section::Blocks).fields, vec!["gas_used"]);
    }

    #[test]
    fn test_set_sort_without_direction_acts_like_click() {
        let mut app = app_with_fixture();
        app.active_section = Section::Transactions;
        app.set_sort("gas", None);
        assert_eq!(app.sort_for(Section::Transactions).orders, vec![true]);
        app.set_sort("gas", None);
        assert_eq!(app.sort_for(Section::Transactions).orders, vec![false]);
    }

    #[test]
    fn test_sort_summary_shows_priority_chain() {
        let mut app = app_with_fixture();
        app.active_section = Section::Transactions;
        app.click_field("block");
        app.click_field("block"); // block descending
        app.click_field("value"); // value primary, block secondary
        assert_eq!(app.sort_summary().unwrap(), "value▲ › block▼");
    }

    #[test]
    fn test_detail_rows_hide_missing_optionals() {
        let mut app = app_with_fixture();
        app.active_section = Section::Transactions;
        // sort so the contract creation (no `to`, no method) is first
        app.set_sort("to", Some(SortDirection::Asc));
        let rows = app.detail_rows();
        let labels: Vec<&str> = rows
            .iter()
            .filter_map(|r| match r {
                FieldRow::Value { label, .. } => Some(*label),
                FieldRow::Heading(_) => None,
            })
            .collect();
        assert!(!labels.contains(&"To"));
        assert!(!labels.contains(&"Method"));
        assert!(labels.contains(&"From"));
    }

    #[test]
    fn test_move_row_clamps() {
        let mut app = app_with_fixture();
        app.active_section = Section::Names;
        app.move_row(100);
        assert_eq!(app.cursor(Section::Names).row, app.names.len() - 1);
        app.move_row(-100);
        assert_eq!(app.cursor(Section::Names).row, 0);
    }

    #[test]
    fn test_move_column_wraps() {
        let mut app = app_with_fixture();
        app.active_section = Section::Names;
        let columns = Section::Names.columns().len();
        app.move_column(-1);
        assert_eq!(app.cursor(Section::Names).column, columns - 1);
        app.move_column(1);
        assert_eq!(app.cursor(Section::Names).column, 0);
    }

    #[test]
    fn test_quit_action() {
        let mut app = app_with_fixture();
        assert!(app.apply_action(Action::Quit).is_none());
        assert!(app.should_quit);
    }

    #[test]
    fn test_reload_action_becomes_request() {
        let mut app = app_with_fixture();
        assert_eq!(app.apply_action(Action::Reload), Some(AppRequest::Reload));
    }
}
