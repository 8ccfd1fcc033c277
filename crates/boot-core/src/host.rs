//! Per-host boot configuration writer

use boot_meta::Host;

use crate::Result;
use crate::context::SyncContext;
use crate::menu::MenuItems;

/// Write every boot configuration file for one host.
///
/// When `menu` is `None` the menu items are computed from the registry
/// first; batch callers pass the items they already computed so the
/// registry is walked once per pass. Generator errors propagate.
pub fn sync_host(ctx: &SyncContext<'_>, host: &Host, menu: Option<&MenuItems>) -> Result<()> {
    let computed;
    let menu = match menu {
        Some(menu) => menu,
        None => {
            computed = ctx.generator.compute_menu_items()?;
            &computed
        }
    };

    ctx.generator.write_host_config(host, menu)?;
    let templates = ctx.generator.write_host_templates(host)?;
    tracing::debug!(host = %host.name, templates, "Synced host");
    Ok(())
}
