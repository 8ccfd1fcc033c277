//! Boot menu model

use serde::Serialize;

/// What a menu entry boots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuEntryKind {
    Distro,
    Host,
}

/// One bootable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    /// Registry name of the distro or host
    pub name: String,
    pub kind: MenuEntryKind,
    /// Kernel path relative to the boot root
    pub kernel: String,
    /// Initrd path relative to the boot root
    pub initrd: String,
    /// Rendered kernel command line, without the initrd argument
    pub append: String,
}

impl MenuEntry {
    /// pxelinux label; host entries are prefixed so they never collide
    /// with distro names.
    pub fn label(&self) -> String {
        match self.kind {
            MenuEntryKind::Distro => self.name.clone(),
            MenuEntryKind::Host => format!("host-{}", self.name),
        }
    }

    /// The `LABEL` block for this entry.
    pub fn render_label(&self) -> String {
        let mut append = format!("initrd={}", self.initrd);
        if !self.append.is_empty() {
            append.push(' ');
            append.push_str(&self.append);
        }
        format!(
            "LABEL {label}\n\tMENU LABEL {name}\n\tkernel {kernel}\n\tappend {append}\n\tipappend 2\n",
            label = self.label(),
            name = self.name,
            kernel = self.kernel,
            append = append,
        )
    }
}

/// Aggregate of every bootable entry.
///
/// Always rebuilt from the whole registry, never patched, so a menu
/// written after a partial sync still lists every host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MenuItems {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

impl MenuItems {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    pub fn entry(&self, kind: MenuEntryKind, name: &str) -> Option<&MenuEntry> {
        self.entries
            .iter()
            .find(|e| e.kind == kind && e.name == name)
    }

    pub fn host_entry(&self, name: &str) -> Option<&MenuEntry> {
        self.entry(MenuEntryKind::Host, name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the `pxelinux.cfg/default` menu.
    pub fn render_pxe_menu(&self) -> String {
        let mut out = String::new();
        out.push_str("DEFAULT menu\nPROMPT 0\n");
        out.push_str(&format!("MENU TITLE {}\n", self.title));
        out.push_str("TIMEOUT 200\nTOTALTIMEOUT 6000\nONTIMEOUT local\n\n");
        out.push_str("LABEL local\n\tMENU LABEL (local)\n\tMENU DEFAULT\n\tLOCALBOOT -1\n");
        for entry in &self.entries {
            out.push('\n');
            out.push_str(&entry.render_label());
        }
        out.push_str("\nMENU end\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(kind: MenuEntryKind, name: &str, append: &str) -> MenuEntry {
        MenuEntry {
            name: name.to_string(),
            kind,
            kernel: format!("/images/{}/vmlinuz", name),
            initrd: format!("/images/{}/initrd.img", name),
            append: append.to_string(),
        }
    }

    #[test]
    fn test_render_label_without_options() {
        let rendered = entry(MenuEntryKind::Distro, "d1", "").render_label();
        assert_eq!(
            rendered,
            "LABEL d1\n\tMENU LABEL d1\n\tkernel /images/d1/vmlinuz\n\tappend initrd=/images/d1/initrd.img\n\tipappend 2\n"
        );
    }

    #[test]
    fn test_host_label_is_prefixed() {
        assert_eq!(entry(MenuEntryKind::Host, "web01", "").label(), "host-web01");
    }

    #[test]
    fn test_menu_lists_every_entry() {
        let mut menu = MenuItems::new("Lab");
        menu.push(entry(MenuEntryKind::Distro, "d1", "quiet"));
        menu.push(entry(MenuEntryKind::Host, "web01", "console=ttyS0"));

        let rendered = menu.render_pxe_menu();

        assert!(rendered.contains("MENU TITLE Lab"));
        assert!(rendered.contains("LABEL d1\n"));
        assert!(rendered.contains("LABEL host-web01\n"));
        assert!(rendered.contains("append initrd=/images/web01/initrd.img console=ttyS0"));
    }

    #[test]
    fn test_host_entry_lookup_ignores_distros() {
        let mut menu = MenuItems::new("Lab");
        menu.push(entry(MenuEntryKind::Distro, "web01", ""));
        assert!(menu.host_entry("web01").is_none());
    }
}
