use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::controller::{CollapseId, ExpandId, SwapId};
use crate::drawer::Pane;

/// Host-document capability: drawer container and its two panes.
/// Timed operations resolve once the host's transition has finished.
#[derive(Clone)]
pub struct Drawer<E> {
    context: CapabilityContext<DrawerOperation, E>,
}

impl<Ev> Capability<Ev> for Drawer<Ev> {
    type Operation = DrawerOperation;
    type MappedSelf<MappedEv> = Drawer<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Drawer::new(self.context.map_event(f))
    }
}

impl<E> Drawer<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<DrawerOperation, E>) -> Self {
        Self { context }
    }

    /// Opens the drawer after `delay_ms`. Resolves once it is open; a
    /// `Collapse` issued in the meantime does not cancel it.
    pub fn expand<F>(&self, expand: ExpandId, delay_ms: u64, callback: F)
    where
        F: FnOnce(ExpandId) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let DrawerOutput::Settled = ctx
                .request_from_shell(DrawerOperation::Expand { delay_ms })
                .await;
            ctx.update_app(callback(expand));
        });
    }

    pub fn collapse<F>(&self, collapse: CollapseId, duration_ms: u64, callback: F)
    where
        F: FnOnce(CollapseId) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let DrawerOutput::Settled = ctx
                .request_from_shell(DrawerOperation::Collapse { duration_ms })
                .await;
            ctx.update_app(callback(collapse));
        });
    }

    /// Fades the current pane out and `to` in.
    pub fn swap_panels<F>(&self, swap: SwapId, to: Pane, fade_ms: u64, callback: F)
    where
        F: FnOnce(SwapId) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let DrawerOutput::Settled = ctx
                .request_from_shell(DrawerOperation::SwapPanels { to, fade_ms })
                .await;
            ctx.update_app(callback(swap));
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawerOperation {
    Expand { delay_ms: u64 },
    Collapse { duration_ms: u64 },
    SwapPanels { to: Pane, fade_ms: u64 },
}

impl Operation for DrawerOperation {
    type Output = DrawerOutput;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawerOutput {
    Settled,
}
