/// Control vocabulary: roles, states, and the per-event descriptor
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Kind of UI control reported by the host
///
/// Roles without a sound cue (window, pane, ...) are still representable so the
/// host can pass through whatever it sees; the catalog simply yields nothing for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    CheckBox,
    RadioButton,
    StaticText,
    EditableText,
    Button,
    MenuBar,
    MenuItem,
    Menu,
    ComboBox,
    List,
    ListItem,
    Graphic,
    Link,
    TreeViewItem,
    Tab,
    TabControl,
    PropertyPage,
    Slider,
    ProgressBar,
    DropDownButton,
    Clock,
    Animation,
    Icon,
    ImageMap,
    RadioMenuItem,
    RichEdit,
    Shape,
    TearOffMenu,
    PopupMenu,
    ToggleButton,
    Chart,
    Diagram,
    Dial,
    DropList,
    MenuButton,
    DropDownButtonGrid,
    HotkeyField,
    Indicator,
    SpinButton,
    TreeViewButton,
    DesktopIcon,
    PasswordEdit,
    CheckMenuItem,
    SplitButton,
    Toolbar,
    Heading,
    Document,
    Application,
    Landmark,
    Article,
    Region,
    Switch,
    Table,
    TableRow,
    TableCell,
    TableColumnHeader,
    TableRowHeader,
    // Roles the host reports that carry no cue
    Unknown,
    Window,
    Pane,
    Dialog,
    Paragraph,
    Section,
    Separator,
    StatusBar,
    TitleBar,
    Grouping,
    Tooltip,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 68] = [
        Role::CheckBox,
        Role::RadioButton,
        Role::StaticText,
        Role::EditableText,
        Role::Button,
        Role::MenuBar,
        Role::MenuItem,
        Role::Menu,
        Role::ComboBox,
        Role::List,
        Role::ListItem,
        Role::Graphic,
        Role::Link,
        Role::TreeViewItem,
        Role::Tab,
        Role::TabControl,
        Role::PropertyPage,
        Role::Slider,
        Role::ProgressBar,
        Role::DropDownButton,
        Role::Clock,
        Role::Animation,
        Role::Icon,
        Role::ImageMap,
        Role::RadioMenuItem,
        Role::RichEdit,
        Role::Shape,
        Role::TearOffMenu,
        Role::PopupMenu,
        Role::ToggleButton,
        Role::Chart,
        Role::Diagram,
        Role::Dial,
        Role::DropList,
        Role::MenuButton,
        Role::DropDownButtonGrid,
        Role::HotkeyField,
        Role::Indicator,
        Role::SpinButton,
        Role::TreeViewButton,
        Role::DesktopIcon,
        Role::PasswordEdit,
        Role::CheckMenuItem,
        Role::SplitButton,
        Role::Toolbar,
        Role::Heading,
        Role::Document,
        Role::Application,
        Role::Landmark,
        Role::Article,
        Role::Region,
        Role::Switch,
        Role::Table,
        Role::TableRow,
        Role::TableCell,
        Role::TableColumnHeader,
        Role::TableRowHeader,
        Role::Unknown,
        Role::Window,
        Role::Pane,
        Role::Dialog,
        Role::Paragraph,
        Role::Section,
        Role::Separator,
        Role::StatusBar,
        Role::TitleBar,
        Role::Grouping,
        Role::Tooltip,
    ];

    /// Snake-case name used in configuration and host events
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::CheckBox => "check_box",
            Role::RadioButton => "radio_button",
            Role::StaticText => "static_text",
            Role::EditableText => "editable_text",
            Role::Button => "button",
            Role::MenuBar => "menu_bar",
            Role::MenuItem => "menu_item",
            Role::Menu => "menu",
            Role::ComboBox => "combo_box",
            Role::List => "list",
            Role::ListItem => "list_item",
            Role::Graphic => "graphic",
            Role::Link => "link",
            Role::TreeViewItem => "tree_view_item",
            Role::Tab => "tab",
            Role::TabControl => "tab_control",
            Role::PropertyPage => "property_page",
            Role::Slider => "slider",
            Role::ProgressBar => "progress_bar",
            Role::DropDownButton => "drop_down_button",
            Role::Clock => "clock",
            Role::Animation => "animation",
            Role::Icon => "icon",
            Role::ImageMap => "image_map",
            Role::RadioMenuItem => "radio_menu_item",
            Role::RichEdit => "rich_edit",
            Role::Shape => "shape",
            Role::TearOffMenu => "tear_off_menu",
            Role::PopupMenu => "popup_menu",
            Role::ToggleButton => "toggle_button",
            Role::Chart => "chart",
            Role::Diagram => "diagram",
            Role::Dial => "dial",
            Role::DropList => "drop_list",
            Role::MenuButton => "menu_button",
            Role::DropDownButtonGrid => "drop_down_button_grid",
            Role::HotkeyField => "hotkey_field",
            Role::Indicator => "indicator",
            Role::SpinButton => "spin_button",
            Role::TreeViewButton => "tree_view_button",
            Role::DesktopIcon => "desktop_icon",
            Role::PasswordEdit => "password_edit",
            Role::CheckMenuItem => "check_menu_item",
            Role::SplitButton => "split_button",
            Role::Toolbar => "toolbar",
            Role::Heading => "heading",
            Role::Document => "document",
            Role::Application => "application",
            Role::Landmark => "landmark",
            Role::Article => "article",
            Role::Region => "region",
            Role::Switch => "switch",
            Role::Table => "table",
            Role::TableRow => "table_row",
            Role::TableCell => "table_cell",
            Role::TableColumnHeader => "table_column_header",
            Role::TableRowHeader => "table_row_header",
            Role::Unknown => "unknown",
            Role::Window => "window",
            Role::Pane => "pane",
            Role::Dialog => "dialog",
            Role::Paragraph => "paragraph",
            Role::Section => "section",
            Role::Separator => "separator",
            Role::StatusBar => "status_bar",
            Role::TitleBar => "title_bar",
            Role::Grouping => "grouping",
            Role::Tooltip => "tooltip",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::SonarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| crate::SonarError::invalid_input(format!("unknown role: {s}")))
    }
}

/// Condition on a control; several may hold at once
///
/// The declaration order is the order in which state cues are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Checked,
    Expanded,
    Collapsed,
    Visited,
    Pressed,
    Selected,
    Busy,
    Clickable,
    HasLongDesc,
    // States the host reports that carry no cue
    HalfChecked,
    Unavailable,
    Focused,
    ReadOnly,
    Invisible,
}

impl State {
    /// Every state, in declaration order
    pub const ALL: [State; 14] = [
        State::Checked,
        State::Expanded,
        State::Collapsed,
        State::Visited,
        State::Pressed,
        State::Selected,
        State::Busy,
        State::Clickable,
        State::HasLongDesc,
        State::HalfChecked,
        State::Unavailable,
        State::Focused,
        State::ReadOnly,
        State::Invisible,
    ];

    /// Snake-case name used in configuration and host events
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Checked => "checked",
            State::Expanded => "expanded",
            State::Collapsed => "collapsed",
            State::Visited => "visited",
            State::Pressed => "pressed",
            State::Selected => "selected",
            State::Busy => "busy",
            State::Clickable => "clickable",
            State::HasLongDesc => "has_long_desc",
            State::HalfChecked => "half_checked",
            State::Unavailable => "unavailable",
            State::Focused => "focused",
            State::ReadOnly => "read_only",
            State::Invisible => "invisible",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = crate::SonarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| crate::SonarError::invalid_input(format!("unknown state: {s}")))
    }
}

/// Parse a heading level as reported by the host
///
/// Focus mode reports an integer, browse mode a string attribute; both end up here.
/// Returns `None` for anything that is not an integer in `1..=255`. Range checking
/// against `1..=6` is left to the catalog, which falls back to the generic heading.
pub fn parse_heading_level(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|level| *level > 0)
}

/// Semantic snapshot of a control at the moment of a navigation event
///
/// Built fresh per event and discarded after the cue has been issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDescriptor {
    /// Control kind
    pub role: Role,

    /// Active states (ordered by declaration, which fixes cue order)
    pub states: BTreeSet<State>,

    /// Heading level, meaningful only when `role` is `Heading`
    pub heading_level: Option<u8>,

    /// On-screen rectangle in host pixels, if the host knows it
    pub screen_rect: Option<super::ScreenRect>,
}

impl ControlDescriptor {
    /// Create a descriptor with no states, level, or location
    pub fn new(role: Role) -> Self {
        Self {
            role,
            states: BTreeSet::new(),
            heading_level: None,
            screen_rect: None,
        }
    }

    /// Add a state
    #[must_use]
    pub fn with_state(mut self, state: State) -> Self {
        self.states.insert(state);
        self
    }

    /// Add several states
    #[must_use]
    pub fn with_states(mut self, states: impl IntoIterator<Item = State>) -> Self {
        self.states.extend(states);
        self
    }

    /// Set the heading level
    #[must_use]
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = Some(level);
        self
    }

    /// Set the on-screen rectangle
    #[must_use]
    pub fn with_rect(mut self, rect: super::ScreenRect) -> Self {
        self.screen_rect = Some(rect);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip_through_from_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn role_name_matches_serde_representation() {
        let json = serde_json::to_string(&Role::TableColumnHeader).unwrap();
        assert_eq!(json, "\"table_column_header\"");
        let json = serde_json::to_string(&State::HasLongDesc).unwrap();
        assert_eq!(json, "\"has_long_desc\"");
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!("spaceship".parse::<Role>().is_err());
        assert!("sparkling".parse::<State>().is_err());
    }

    #[test]
    fn states_iterate_in_declaration_order() {
        let descriptor = ControlDescriptor::new(Role::Button).with_states([
            State::HasLongDesc,
            State::Pressed,
            State::Checked,
        ]);

        let order: Vec<State> = descriptor.states.iter().copied().collect();
        assert_eq!(order, vec![State::Checked, State::Pressed, State::HasLongDesc]);
    }

    #[test]
    fn heading_level_parsing() {
        assert_eq!(parse_heading_level("3"), Some(3));
        assert_eq!(parse_heading_level(" 2 "), Some(2));
        assert_eq!(parse_heading_level("0"), None);
        assert_eq!(parse_heading_level("three"), None);
        assert_eq!(parse_heading_level("-1"), None);
    }
}
