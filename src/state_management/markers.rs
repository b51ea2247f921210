use std::collections::{BTreeSet, HashMap, HashSet};

use dioxus::prelude::*;

use page_loader::loader::{Marker, PageElement, PageSurface};

/// Markers currently applied to the page elements, as rendered by the views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMarkers {
    classes: HashMap<PageElement, BTreeSet<Marker>>,
    mounted: HashSet<PageElement>,
    out_of_layout: HashSet<PageElement>,
}
impl PageMarkers {
    /// Space separated class list of the element
    pub fn class_of(&self, element: PageElement) -> String {
        self.classes
            .get(&element)
            .map(|set| {
                set.iter()
                    .map(Marker::class_name)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }
    pub fn in_layout(&self, element: PageElement) -> bool {
        !self.out_of_layout.contains(&element)
    }
    pub fn is_mounted(&self, element: PageElement) -> bool {
        self.mounted.contains(&element)
    }
    pub fn mount(&mut self, element: PageElement) {
        log::debug!("PageMarkers - {element} mounted");
        self.mounted.insert(element);
    }
}

/// [`PageSurface`] writing into the [`PageMarkers`] signal the views render from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSurface {
    markers: Signal<PageMarkers>,
}
impl SignalSurface {
    pub fn new(markers: Signal<PageMarkers>) -> Self {
        Self { markers }
    }
}
impl PageSurface for SignalSurface {
    fn contains(&self, element: PageElement) -> bool {
        self.markers.peek().is_mounted(element)
    }

    fn add_marker(&mut self, element: PageElement, marker: Marker) {
        self.markers
            .write()
            .classes
            .entry(element)
            .or_default()
            .insert(marker);
    }

    fn remove_marker(&mut self, element: PageElement, marker: Marker) {
        if let Some(set) = self.markers.write().classes.get_mut(&element) {
            set.remove(&marker);
        }
    }

    fn remove_from_layout(&mut self, element: PageElement) {
        self.markers.write().out_of_layout.insert(element);
    }
}
