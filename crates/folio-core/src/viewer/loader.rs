use tracing::{debug, info, warn};

use crate::catalog::PageCatalog;
use crate::host::PageHost;
use crate::input::ImageOutcome;
use crate::registry::{ImageSlot, LoadState, ScrollAnchor, SlotId};

use super::Viewer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InsertSide {
    Start,
    End,
}

/// Progress of the strictly sequential initial attachment.
#[derive(Clone, Copy, Debug)]
pub(super) struct PreloadChain {
    priority: usize,
    next: usize,
    /// Slot whose load/error event the chain is waiting on.
    awaiting: Option<SlotId>,
}

impl<H: PageHost> Viewer<H> {
    /// Append page `index` after every attached page. No-op (returns false)
    /// when the index is out of range or already attached.
    pub fn attach_at_end(&mut self, index: usize) -> bool {
        self.attach(index, InsertSide::End).is_some()
    }

    /// Insert page `index` before every attached page. Once the image loads,
    /// the scroll offset is advanced by the height that image added so the
    /// reader's view does not move. Pages appended in the meantime grow the
    /// document below the reader and are not counted.
    pub fn attach_at_start(&mut self, index: usize) -> bool {
        self.attach(index, InsertSide::Start).is_some()
    }

    /// Attach pages `0..priority_count` one at a time, each after the
    /// previous one has loaded or failed, then keep going through the rest
    /// of the catalog the same way. The viewer reports ready once the
    /// priority pages have settled.
    pub fn preload_initial_window(&mut self, priority_count: usize) {
        if self.disposed {
            return;
        }
        let priority = priority_count.min(self.catalog.len());
        info!(
            priority,
            total = self.catalog.len(),
            "Starting initial preload"
        );
        self.ready = false;
        self.host.set_loading(true);
        self.preload = Some(PreloadChain {
            priority,
            next: 0,
            awaiting: None,
        });
        self.advance_preload();
    }

    fn attach(&mut self, index: usize, side: InsertSide) -> Option<SlotId> {
        if self.slots.has(index) {
            debug!(index, "Page already attached");
            return None;
        }
        let src = match self.catalog.try_source(index) {
            Ok(src) => src,
            Err(e) => {
                debug!(error = %e, "Page not attached");
                return None;
            }
        };

        let id = SlotId(self.next_slot);
        self.next_slot += 1;
        let alt = self.catalog.alt_text(index);
        let image = match self.host.create_image(id, index, src, &alt) {
            Ok(image) => image,
            Err(e) => {
                warn!(index, error = %e, "Could not create page image");
                return None;
            }
        };

        let mut slot = ImageSlot::new(index, id, image);
        match side {
            InsertSide::End => self.host.append_image(&slot.image),
            InsertSide::Start => {
                self.host.prepend_image(&slot.image);
                // Applied when the image settles.
                slot.anchor = Some(ScrollAnchor {
                    inserted_height: self.host.image_span(&slot.image).height,
                });
            }
        }
        self.slots.set(slot);

        debug!(index, %id, ?side, "Page attached");
        self.observer.slot_attached(index);
        Some(id)
    }

    pub(super) fn on_image_settled(&mut self, id: SlotId, outcome: ImageOutcome) {
        let Some(slot) = self.slots.find_mut(id) else {
            debug!(%id, "Settle event for a detached slot ignored");
            return;
        };
        if slot.state != LoadState::Pending {
            debug!(%id, "Duplicate settle event ignored");
            return;
        }

        let index = slot.index;
        let anchor = slot.anchor.take();
        match outcome {
            ImageOutcome::Loaded => {
                slot.state = LoadState::Loaded;
                if let Some(anchor) = anchor {
                    let delta = self.host.image_span(&slot.image).height - anchor.inserted_height;
                    debug!(index, delta, "Compensating scroll for prepended page");
                    let top = self.host.scroll_top();
                    self.host.scroll_to(top + delta);
                }
            }
            ImageOutcome::Failed => {
                slot.state = LoadState::Failed;
                let alt = PageCatalog::failure_text(index);
                self.host.mark_failed(&slot.image, &alt);
                warn!(page = index + 1, "Failed to load page");
            }
        }

        self.observer.slot_settled(index, outcome);
        self.continue_preload(id);
    }

    fn continue_preload(&mut self, settled: SlotId) {
        let waiting = matches!(self.preload, Some(chain) if chain.awaiting == Some(settled));
        if waiting {
            self.advance_preload();
        }
    }

    fn advance_preload(&mut self) {
        while let Some(chain) = self.preload {
            if chain.next >= chain.priority && !self.ready {
                self.mark_ready();
            }
            if chain.next >= self.catalog.len() {
                self.preload = None;
                info!(pages = self.catalog.len(), "Initial preload complete");
                return;
            }

            let index = chain.next;
            let existing = self.slots.get(index).map(|slot| (slot.id, slot.state));
            let awaiting = match existing {
                Some((id, LoadState::Pending)) => Some(id),
                Some(_) => None,
                None => self.attach(index, InsertSide::End),
            };
            self.preload = Some(PreloadChain {
                next: index + 1,
                awaiting,
                ..chain
            });
            if awaiting.is_some() {
                return;
            }
        }
    }

    pub(super) fn mark_ready(&mut self) {
        self.ready = true;
        self.host.set_loading(false);
        self.observer.ready();
        info!("Viewer ready");
    }
}
