//! ``src/model/form.rs``
//! ============================================================================
//! # Server form
//!
//! Editable buffer behind both the "add server" overlay and the detail edit
//! mode. Text fields hold raw input; validation turns them into
//! [`ValidationError`] values shown under a field once it has been touched.

use enum_map::{Enum, EnumMap};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::i18n::Translator;
use crate::model::server::{Location, Server, ServerPatch, ServerStatus};

pub const REQUIRED: &str = "COMMON.VALIDATION.REQUIRED";
pub const MIN_LENGTH: &str = "COMMON.VALIDATION.MIN_LENGTH";
pub const INVALID_IP: &str = "COMMON.VALIDATION.INVALID_IP";
pub const MIN_VALUE: &str = "COMMON.VALIDATION.MIN_VALUE";
pub const MAX_VALUE: &str = "COMMON.VALIDATION.MAX_VALUE";

const HOSTNAME_MIN_LENGTH: usize = 3;

static IP_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}",
        r"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    ))
    .expect("IPv4 pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum FormField {
    Hostname,
    IpAddress,
    Location,
    Os,
    Status,
    CpuCores,
    RamGb,
    StorageGb,
}

impl FormField {
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Hostname => "SERVER.FIELDS.HOSTNAME",
            Self::IpAddress => "SERVER.FIELDS.IP_ADDRESS",
            Self::Location => "SERVER.FIELDS.LOCATION",
            Self::Os => "SERVER.FIELDS.OS",
            Self::Status => "SERVER.FIELDS.STATUS",
            Self::CpuCores => "SERVER.FIELDS.CPU_CORES",
            Self::RamGb => "SERVER.FIELDS.RAM_GB",
            Self::StorageGb => "SERVER.FIELDS.STORAGE_GB",
        }
    }

    /// Choice fields cycle through a fixed option set instead of taking text.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Location | Self::Status)
    }

    const fn numeric_bounds(self) -> Option<(i64, i64)> {
        match self {
            Self::CpuCores => Some((1, 256)),
            Self::RamGb => Some((1, 1024)),
            Self::StorageGb => Some((1, 100_000)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Add,
    Edit,
}

impl FormKind {
    #[must_use]
    pub const fn fields(self) -> &'static [FormField] {
        match self {
            Self::Add => &[
                FormField::Hostname,
                FormField::IpAddress,
                FormField::Location,
                FormField::Os,
                FormField::Status,
                FormField::CpuCores,
                FormField::RamGb,
                FormField::StorageGb,
            ],
            Self::Edit => &[
                FormField::Hostname,
                FormField::IpAddress,
                FormField::Location,
                FormField::Os,
                FormField::CpuCores,
                FormField::RamGb,
                FormField::StorageGb,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub key: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl ValidationError {
    fn new(key: &'static str) -> Self {
        Self {
            key,
            params: Vec::new(),
        }
    }

    fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Localized message. The `field` param is a label key and is translated
    /// before interpolation.
    #[must_use]
    pub fn render(&self, translator: &Translator) -> String {
        let resolved: Vec<(&str, String)> = self
            .params
            .iter()
            .map(|(name, value)| {
                if *name == "field" {
                    (*name, translator.instant(value))
                } else {
                    (*name, value.clone())
                }
            })
            .collect();
        let borrowed: Vec<(&str, &str)> = resolved
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();

        translator.instant_with(self.key, &borrowed)
    }
}

#[derive(Debug, Clone)]
pub struct ServerForm {
    kind: FormKind,
    pub hostname: String,
    pub ip_address: String,
    pub location: Option<Location>,
    pub os: String,
    pub status: Option<ServerStatus>,
    pub cpu_cores: String,
    pub ram_gb: String,
    pub storage_gb: String,
    touched: EnumMap<FormField, bool>,
    focus: usize,
}

impl ServerForm {
    /// Blank "add server" form with the usual defaults.
    #[must_use]
    pub fn new_add() -> Self {
        Self {
            kind: FormKind::Add,
            hostname: String::new(),
            ip_address: String::new(),
            location: Some(Location::DcEast),
            os: String::new(),
            status: Some(ServerStatus::Stopped),
            cpu_cores: "4".into(),
            ram_gb: "8".into(),
            storage_gb: "100".into(),
            touched: EnumMap::default(),
            focus: 0,
        }
    }

    /// Edit form initialised from `server`.
    #[must_use]
    pub fn from_server(server: &Server) -> Self {
        Self {
            kind: FormKind::Edit,
            hostname: server.hostname.clone(),
            ip_address: server.ip_address.clone(),
            location: Some(server.location),
            os: server.os.clone(),
            status: None,
            cpu_cores: server.cpu_cores.to_string(),
            ram_gb: server.ram_gb.to_string(),
            storage_gb: server.storage_gb.to_string(),
            touched: EnumMap::default(),
            focus: 0,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FormKind {
        self.kind
    }

    #[must_use]
    pub const fn fields(&self) -> &'static [FormField] {
        self.kind.fields()
    }

    fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Hostname => &self.hostname,
            FormField::IpAddress => &self.ip_address,
            FormField::Os => &self.os,
            FormField::CpuCores => &self.cpu_cores,
            FormField::RamGb => &self.ram_gb,
            FormField::StorageGb => &self.storage_gb,
            FormField::Location | FormField::Status => "",
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Hostname => Some(&mut self.hostname),
            FormField::IpAddress => Some(&mut self.ip_address),
            FormField::Os => Some(&mut self.os),
            FormField::CpuCores => Some(&mut self.cpu_cores),
            FormField::RamGb => Some(&mut self.ram_gb),
            FormField::StorageGb => Some(&mut self.storage_gb),
            FormField::Location | FormField::Status => None,
        }
    }

    /// Display value of a field.
    #[must_use]
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Location => self.location.map(|l| l.to_string()).unwrap_or_default(),
            FormField::Status => self.status.map(|s| s.to_string()).unwrap_or_default(),
            other => self.text(other).to_string(),
        }
    }

    /// First failing rule for `field`, in priority order.
    #[must_use]
    pub fn validate_field(&self, field: FormField) -> Option<ValidationError> {
        let required = || ValidationError::new(REQUIRED).with("field", field.label_key());

        match field {
            FormField::Location => self.location.is_none().then(required),
            FormField::Status => {
                (self.kind == FormKind::Add && self.status.is_none()).then(required)
            }
            FormField::Hostname => {
                let value = self.hostname.as_str();
                if value.is_empty() {
                    Some(required())
                } else if value.chars().count() < HOSTNAME_MIN_LENGTH {
                    Some(
                        ValidationError::new(MIN_LENGTH)
                            .with("field", field.label_key())
                            .with("length", HOSTNAME_MIN_LENGTH),
                    )
                } else {
                    None
                }
            }
            FormField::IpAddress => {
                if self.ip_address.is_empty() {
                    Some(required())
                } else if IP_ADDRESS.is_match(&self.ip_address) {
                    None
                } else {
                    Some(ValidationError::new(INVALID_IP))
                }
            }
            FormField::Os => self.os.is_empty().then(required),
            FormField::CpuCores | FormField::RamGb | FormField::StorageGb => {
                let (min, max) = field.numeric_bounds()?;
                match self.text(field).trim().parse::<i64>() {
                    Err(_) => Some(required()),
                    Ok(value) if value < min => {
                        Some(ValidationError::new(MIN_VALUE).with("min", min))
                    }
                    Ok(value) if value > max => {
                        Some(ValidationError::new(MAX_VALUE).with("max", max))
                    }
                    Ok(_) => None,
                }
            }
        }
    }

    /// Error to show under `field`: only once the field was touched.
    #[must_use]
    pub fn visible_error(&self, field: FormField) -> Option<ValidationError> {
        if self.touched[field] {
            self.validate_field(field)
        } else {
            None
        }
    }

    #[must_use]
    pub fn errors(&self) -> Vec<(FormField, ValidationError)> {
        self.fields()
            .iter()
            .filter_map(|field| self.validate_field(*field).map(|err| (*field, err)))
            .collect()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields()
            .iter()
            .all(|field| self.validate_field(*field).is_none())
    }

    pub fn mark_all_touched(&mut self) {
        for field in self.kind.fields() {
            self.touched[*field] = true;
        }
    }

    #[must_use]
    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched[field]
    }

    fn parsed(&self, field: FormField) -> Option<u32> {
        self.text(field).trim().parse().ok()
    }

    /// Patch for create/update; `None` while the form is invalid. Add forms
    /// carry status and a zero uptime, edit forms leave both alone.
    #[must_use]
    pub fn to_patch(&self) -> Option<ServerPatch> {
        if !self.is_valid() {
            return None;
        }

        let (status, uptime_hours) = match self.kind {
            FormKind::Add => (self.status, Some(0)),
            FormKind::Edit => (None, None),
        };

        Some(ServerPatch {
            hostname: Some(self.hostname.clone()),
            ip_address: Some(self.ip_address.clone()),
            status,
            location: self.location,
            os: Some(self.os.clone()),
            cpu_cores: self.parsed(FormField::CpuCores),
            ram_gb: self.parsed(FormField::RamGb),
            storage_gb: self.parsed(FormField::StorageGb),
            uptime_hours,
        })
    }

    #[must_use]
    pub fn focused(&self) -> FormField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Type into the focused text field.
    pub fn input_char(&mut self, c: char) {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.push(c);
            self.touched[field] = true;
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.pop();
            self.touched[field] = true;
        }
    }

    /// Step the focused choice field through its options.
    pub fn cycle_choice(&mut self, forward: bool) {
        let field = self.focused();
        match field {
            FormField::Location => {
                self.location = Some(step(&Location::ALL, self.location, forward));
            }
            FormField::Status => {
                self.status = Some(step(&ServerStatus::ALL, self.status, forward));
            }
            _ => return,
        }
        self.touched[field] = true;
    }
}

fn step<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> T {
    let len = options.len();
    let index = current
        .and_then(|value| options.iter().position(|o| *o == value))
        .map_or(0, |i| if forward { (i + 1) % len } else { (i + len - 1) % len });
    options[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    fn valid_add() -> ServerForm {
        let mut form = ServerForm::new_add();
        form.hostname = "web-new-01".into();
        form.ip_address = "10.1.2.3".into();
        form.os = "Debian 12".into();
        form
    }

    #[test]
    fn test_add_defaults() {
        let form = ServerForm::new_add();
        assert_eq!(form.location, Some(Location::DcEast));
        assert_eq!(form.status, Some(ServerStatus::Stopped));
        assert_eq!(form.value(FormField::CpuCores), "4");
        assert_eq!(form.value(FormField::RamGb), "8");
        assert_eq!(form.value(FormField::StorageGb), "100");
        assert!(!form.is_valid());
    }

    #[test]
    fn test_hostname_required_then_min_length() {
        let mut form = valid_add();
        form.hostname.clear();
        let err = form.validate_field(FormField::Hostname).expect("required");
        assert_eq!(err.key, REQUIRED);
        assert_eq!(err.param("field"), Some("SERVER.FIELDS.HOSTNAME"));

        form.hostname = "ab".into();
        let err = form.validate_field(FormField::Hostname).expect("too short");
        assert_eq!(err.key, MIN_LENGTH);
        assert_eq!(err.param("length"), Some("3"));
    }

    #[test]
    fn test_ip_pattern() {
        let mut form = valid_add();
        for bad in ["256.1.1.1", "10.0.0", "a.b.c.d", "1.2.3.4.5"] {
            form.ip_address = bad.into();
            assert_eq!(
                form.validate_field(FormField::IpAddress).map(|e| e.key),
                Some(INVALID_IP),
                "{bad}"
            );
        }
        form.ip_address = "255.255.255.0".into();
        assert!(form.validate_field(FormField::IpAddress).is_none());
    }

    #[test]
    fn test_numeric_bounds_and_non_numeric() {
        let mut form = valid_add();

        form.cpu_cores = "0".into();
        let err = form.validate_field(FormField::CpuCores).expect("below min");
        assert_eq!((err.key, err.param("min")), (MIN_VALUE, Some("1")));

        form.cpu_cores = "257".into();
        let err = form.validate_field(FormField::CpuCores).expect("above max");
        assert_eq!((err.key, err.param("max")), (MAX_VALUE, Some("256")));

        form.storage_gb = "100001".into();
        assert_eq!(form.validate_field(FormField::StorageGb).map(|e| e.key), Some(MAX_VALUE));

        form.ram_gb = "lots".into();
        assert_eq!(form.validate_field(FormField::RamGb).map(|e| e.key), Some(REQUIRED));
    }

    #[test]
    fn test_errors_only_visible_after_touch() {
        let mut form = ServerForm::new_add();
        assert!(form.visible_error(FormField::Hostname).is_none());

        form.mark_all_touched();
        assert_eq!(form.visible_error(FormField::Hostname).map(|e| e.key), Some(REQUIRED));
        assert_eq!(form.errors().len(), 3);
    }

    #[test]
    fn test_add_patch_sets_status_and_zero_uptime() {
        let patch = valid_add().to_patch().expect("valid");
        assert_eq!(patch.status, Some(ServerStatus::Stopped));
        assert_eq!(patch.uptime_hours, Some(0));
        assert_eq!(patch.cpu_cores, Some(4));
        assert!(ServerForm::new_add().to_patch().is_none());
    }

    #[test]
    fn test_edit_form_skips_status() {
        let server = ServerPatch {
            hostname: Some("db-master-01".into()),
            ip_address: Some("10.0.2.21".into()),
            os: Some("Rocky Linux 9".into()),
            ..ServerPatch::default()
        }
        .into_server("srv-002".into());

        let form = ServerForm::from_server(&server);
        assert!(!form.fields().contains(&FormField::Status));
        assert!(form.is_valid());

        let patch = form.to_patch().expect("valid");
        assert_eq!(patch.status, None);
        assert_eq!(patch.uptime_hours, None);
    }

    #[test]
    fn test_typing_and_choice_cycling() {
        let mut form = ServerForm::new_add();
        form.input_char('w');
        form.input_char('x');
        form.backspace();
        assert_eq!(form.hostname, "w");
        assert!(form.is_touched(FormField::Hostname));

        form.focus_next();
        form.focus_next();
        assert_eq!(form.focused(), FormField::Location);
        form.input_char('z');
        form.cycle_choice(true);
        assert_eq!(form.location, Some(Location::DcWest));
        form.cycle_choice(false);
        form.cycle_choice(false);
        assert_eq!(form.location, Some(Location::DcEurope));

        form.focus_prev();
        form.focus_prev();
        form.focus_prev();
        assert_eq!(form.focused(), FormField::StorageGb);
    }

    #[test]
    fn test_render_translates_field_label() {
        let translator = Translator::new(Language::En).expect("catalogs");
        let mut form = ServerForm::new_add();
        form.os.clear();
        let err = form.validate_field(FormField::Os).expect("required");
        assert_eq!(err.render(&translator), "Operating System is required");
    }
}
