//! Built-in sound tables
//!
//! Every role and state maps to exactly one default sound and one control key.
//! The control key is the stable name user overrides are stored under, so the
//! override schema survives changes to the role/state vocabulary.

use sonar_core::{Role, State};

/// Default sound and override key for one role or state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Bundled sound file name
    pub sound: &'static str,

    /// Key used for user overrides
    pub control_key: &'static str,
}

const fn entry(sound: &'static str, control_key: &'static str) -> CatalogEntry {
    CatalogEntry { sound, control_key }
}

/// Base entry for a role, or `None` for roles without a cue
pub fn role_entry(role: Role) -> Option<CatalogEntry> {
    let found = match role {
        Role::CheckBox | Role::CheckMenuItem => entry("checkbox.wav", "checkbox"),
        Role::RadioButton | Role::RadioMenuItem => entry("radiobutton.wav", "radiobutton"),
        Role::StaticText | Role::EditableText | Role::RichEdit | Role::HotkeyField => {
            entry("editabletext.wav", "editabletext")
        }
        Role::Button | Role::DropDownButtonGrid | Role::TreeViewButton => {
            entry("button.wav", "button")
        }
        Role::MenuBar | Role::MenuItem | Role::Menu | Role::TearOffMenu => {
            entry("menuitem.wav", "menuitem")
        }
        Role::ComboBox | Role::DropDownButton | Role::DropList => {
            entry("combobox.wav", "combobox")
        }
        Role::List => entry("list.wav", "list"),
        Role::ListItem => entry("listitem.wav", "listitem"),
        Role::Graphic => entry("graphic.wav", "graphic"),
        Role::Link => entry("link.wav", "link"),
        Role::TreeViewItem => entry("treeviewitem.wav", "treeviewitem"),
        Role::Tab | Role::TabControl => entry("tab.wav", "tab"),
        Role::PropertyPage => entry("propertypage.wav", "propertypage"),
        Role::Slider | Role::Dial | Role::SpinButton => entry("slider.wav", "slider"),
        Role::ProgressBar => entry("progressbar.wav", "progressbar"),
        Role::Clock => entry("clock.wav", "clock"),
        Role::Animation
        | Role::Icon
        | Role::ImageMap
        | Role::Shape
        | Role::Chart
        | Role::Diagram
        | Role::Indicator
        | Role::DesktopIcon => entry("icon.wav", "icon"),
        Role::PopupMenu => entry("popupmenu.wav", "popupmenu"),
        Role::ToggleButton => entry("togglebutton.wav", "togglebutton"),
        Role::MenuButton => entry("menubutton.wav", "menubutton"),
        Role::PasswordEdit => entry("passwordedit.wav", "passwordedit"),
        Role::SplitButton => entry("splitbutton.wav", "splitbutton"),
        Role::Toolbar => entry("toolbar.wav", "toolbar"),
        Role::Heading => entry("heading.wav", "heading"),
        Role::Document => entry("document.wav", "document"),
        Role::Application => entry("application.wav", "application"),
        Role::Landmark => entry("landmark.wav", "landmark"),
        Role::Article => entry("article.wav", "article"),
        Role::Region => entry("region.wav", "region"),
        Role::Switch => entry("switch.wav", "switch"),
        Role::Table => entry("table.wav", "table"),
        Role::TableRow => entry("tablerow.wav", "tablerow"),
        Role::TableCell => entry("tablecell.wav", "tablecell"),
        Role::TableColumnHeader | Role::TableRowHeader => entry("tableheader.wav", "tableheader"),
        Role::Unknown
        | Role::Window
        | Role::Pane
        | Role::Dialog
        | Role::Paragraph
        | Role::Section
        | Role::Separator
        | Role::StatusBar
        | Role::TitleBar
        | Role::Grouping
        | Role::Tooltip => return None,
    };
    Some(found)
}

/// Base entry for a state, or `None` for states without a cue
pub fn state_entry(state: State) -> Option<CatalogEntry> {
    let found = match state {
        State::Checked => entry("checked.wav", "checked"),
        State::Expanded => entry("expanded.wav", "expanded"),
        State::Collapsed => entry("collapsed.wav", "collapsed"),
        State::Visited => entry("visited.wav", "visited"),
        State::Pressed => entry("pressed.wav", "pressed"),
        State::Selected => entry("selected.wav", "selected"),
        State::Busy => entry("busy.wav", "busy"),
        State::Clickable => entry("clickable.wav", "clickable"),
        State::HasLongDesc => entry("haslongdesc.wav", "haslongdesc"),
        State::HalfChecked
        | State::Unavailable
        | State::Focused
        | State::ReadOnly
        | State::Invisible => return None,
    };
    Some(found)
}

const HEADING_LEVELS: [CatalogEntry; 6] = [
    entry("h1.wav", "heading1"),
    entry("h2.wav", "heading2"),
    entry("h3.wav", "heading3"),
    entry("h4.wav", "heading4"),
    entry("h5.wav", "heading5"),
    entry("h6.wav", "heading6"),
];

/// Level-specific heading entry for levels 1-6
pub fn heading_level_entry(level: u8) -> Option<CatalogEntry> {
    match level {
        1..=6 => Some(HEADING_LEVELS[usize::from(level) - 1]),
        _ => None,
    }
}

/// A control key as shown in the sound customization UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlKeyInfo {
    pub key: &'static str,
    pub display_name: &'static str,
    pub default_sound: &'static str,
}

const fn key(
    key: &'static str,
    display_name: &'static str,
    default_sound: &'static str,
) -> ControlKeyInfo {
    ControlKeyInfo {
        key,
        display_name,
        default_sound,
    }
}

/// Every control key a user can override
pub const CONTROL_KEYS: &[ControlKeyInfo] = &[
    key("checkbox", "Checkbox", "checkbox.wav"),
    key("radiobutton", "Radio Button", "radiobutton.wav"),
    key("editabletext", "Text Field", "editabletext.wav"),
    key("button", "Button", "button.wav"),
    key("menuitem", "Menu Item", "menuitem.wav"),
    key("combobox", "Combo Box", "combobox.wav"),
    key("listitem", "List Item", "listitem.wav"),
    key("graphic", "Graphic", "graphic.wav"),
    key("link", "Link", "link.wav"),
    key("treeviewitem", "Tree View Item", "treeviewitem.wav"),
    key("tab", "Tab", "tab.wav"),
    key("slider", "Slider", "slider.wav"),
    key("clock", "Clock", "clock.wav"),
    key("icon", "Icon", "icon.wav"),
    key("togglebutton", "Toggle Button", "togglebutton.wav"),
    key("menubutton", "Menu Button", "menubutton.wav"),
    key("passwordedit", "Password Field", "passwordedit.wav"),
    key("splitbutton", "Split Button", "splitbutton.wav"),
    key("heading", "Heading", "heading.wav"),
    key("heading1", "Heading Level 1", "h1.wav"),
    key("heading2", "Heading Level 2", "h2.wav"),
    key("heading3", "Heading Level 3", "h3.wav"),
    key("heading4", "Heading Level 4", "h4.wav"),
    key("heading5", "Heading Level 5", "h5.wav"),
    key("heading6", "Heading Level 6", "h6.wav"),
    key("document", "Document", "document.wav"),
    key("application", "Application", "application.wav"),
    key("landmark", "Landmark", "landmark.wav"),
    key("article", "Article", "article.wav"),
    key("region", "Region", "region.wav"),
    key("switch", "Switch", "switch.wav"),
    key("list", "List", "list.wav"),
    key("progressbar", "Progress Bar", "progressbar.wav"),
    key("toolbar", "Toolbar", "toolbar.wav"),
    key("popupmenu", "Popup Menu", "popupmenu.wav"),
    key("propertypage", "Property Page", "propertypage.wav"),
    key("table", "Table", "table.wav"),
    key("tablerow", "Table Row", "tablerow.wav"),
    key("tablecell", "Table Cell", "tablecell.wav"),
    key("tableheader", "Table Header", "tableheader.wav"),
    key("checked", "Checked State", "checked.wav"),
    key("expanded", "Expanded State", "expanded.wav"),
    key("collapsed", "Collapsed State", "collapsed.wav"),
    key("visited", "Visited State", "visited.wav"),
    key("pressed", "Pressed State", "pressed.wav"),
    key("selected", "Selected State", "selected.wav"),
    key("busy", "Busy State", "busy.wav"),
    key("clickable", "Clickable State", "clickable.wav"),
    key("haslongdesc", "Has Long Description", "haslongdesc.wav"),
];

/// Look up a control key
pub(crate) fn control_key_info(key: &str) -> Option<&'static ControlKeyInfo> {
    CONTROL_KEYS.iter().find(|info| info.key == key)
}
