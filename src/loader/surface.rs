use std::{
    cell::RefCell,
    collections::{BTreeSet, HashMap, HashSet},
    rc::Rc,
    time::Duration,
};

use tokio::time::Instant;

/// Elements of the page the loader drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageElement {
    /// Outermost root of the page (`<html>`)
    Document,
    /// Root container holding both the overlay and the content (`<body>`)
    Body,
    /// Full-screen loading overlay
    Overlay,
    /// Main page content
    Content,
}

impl PageElement {
    pub const ALL: [PageElement; 4] = [
        PageElement::Document,
        PageElement::Body,
        PageElement::Overlay,
        PageElement::Content,
    ];

    /// DOM id the markup must give the element, if it is located by id
    pub fn dom_id(&self) -> Option<&'static str> {
        match self {
            Self::Document | Self::Body => None,
            Self::Overlay => Some("pageLoader"),
            Self::Content => Some("pageContent"),
        }
    }
}

impl core::fmt::Display for PageElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.dom_id() {
            Some(id) => write!(f, "#{id}"),
            None => f.write_str(match self {
                Self::Document => "html",
                _ => "body",
            }),
        }
    }
}

/// Markers are the only contract with the stylesheet: it keys the fade timings
/// and the initial visibility off these class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
    SkipLoader,
    Loading,
    Hidden,
    Loaded,
}

impl Marker {
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::SkipLoader => "skip-loader",
            Self::Loading => "loading",
            Self::Hidden => "hidden",
            Self::Loaded => "loaded",
        }
    }
}

impl core::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}

/// The presentation layer as seen by the loader controller
///
/// Every mutation is a local style change and cannot fail.
pub trait PageSurface {
    /// Whether the element can be located on the page
    fn contains(&self, element: PageElement) -> bool;
    fn add_marker(&mut self, element: PageElement, marker: Marker);
    fn remove_marker(&mut self, element: PageElement, marker: Marker);
    /// Takes the element out of the layout entirely (`display: none`)
    fn remove_from_layout(&mut self, element: PageElement);
}

/// Waits until every element in `elements` can be located on the surface, or
/// `timeout` elapses. Returns whether they are all present.
pub async fn wait_for_elements<S: PageSurface>(
    surface: &S,
    elements: &[PageElement],
    timeout: Duration,
) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if elements.iter().all(|element| surface.contains(*element)) {
            return true;
        }
        if Instant::now() >= deadline {
            log::debug!("wait_for_elements - still missing after {timeout:?}");
            return false;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceChange {
    Added(PageElement, Marker),
    Removed(PageElement, Marker),
    RemovedFromLayout(PageElement),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceEvent {
    pub at: Instant,
    pub change: SurfaceChange,
}

#[derive(Debug, Default)]
struct RecordingSurfaceInner {
    present: HashSet<PageElement>,
    markers: HashMap<PageElement, BTreeSet<Marker>>,
    out_of_layout: HashSet<PageElement>,
    journal: Vec<SurfaceEvent>,
}

/// In-memory [`PageSurface`] keeping every change it receives
///
/// Clones share the same state, so one handle can be inspected while the
/// controller owns another.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    inner: Rc<RefCell<RecordingSurfaceInner>>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::with_elements(PageElement::ALL)
    }
}

impl RecordingSurface {
    /// A surface where only the given elements exist
    pub fn with_elements(elements: impl IntoIterator<Item = PageElement>) -> Self {
        let inner = RecordingSurfaceInner {
            present: elements.into_iter().collect(),
            ..Default::default()
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Makes `element` locatable, as when the markup finishes mounting it
    pub fn mount(&self, element: PageElement) {
        self.inner.borrow_mut().present.insert(element);
    }

    pub fn has_marker(&self, element: PageElement, marker: Marker) -> bool {
        self.inner
            .borrow()
            .markers
            .get(&element)
            .is_some_and(|set| set.contains(&marker))
    }

    pub fn markers(&self, element: PageElement) -> Vec<Marker> {
        self.inner
            .borrow()
            .markers
            .get(&element)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn in_layout(&self, element: PageElement) -> bool {
        !self.inner.borrow().out_of_layout.contains(&element)
    }

    pub fn journal(&self) -> Vec<SurfaceEvent> {
        self.inner.borrow().journal.clone()
    }

    /// Instant of the first journal entry matching `change`
    pub fn first(&self, change: SurfaceChange) -> Option<Instant> {
        self.inner
            .borrow()
            .journal
            .iter()
            .find(|event| event.change == change)
            .map(|event| event.at)
    }

    fn record(&self, change: SurfaceChange) {
        self.inner.borrow_mut().journal.push(SurfaceEvent {
            at: Instant::now(),
            change,
        });
    }
}

impl PageSurface for RecordingSurface {
    fn contains(&self, element: PageElement) -> bool {
        self.inner.borrow().present.contains(&element)
    }

    fn add_marker(&mut self, element: PageElement, marker: Marker) {
        self.inner
            .borrow_mut()
            .markers
            .entry(element)
            .or_default()
            .insert(marker);
        self.record(SurfaceChange::Added(element, marker));
    }

    fn remove_marker(&mut self, element: PageElement, marker: Marker) {
        if let Some(set) = self.inner.borrow_mut().markers.get_mut(&element) {
            set.remove(&marker);
        }
        self.record(SurfaceChange::Removed(element, marker));
    }

    fn remove_from_layout(&mut self, element: PageElement) {
        self.inner.borrow_mut().out_of_layout.insert(element);
        self.record(SurfaceChange::RemovedFromLayout(element));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_match_the_stylesheet() {
        assert_eq!(Marker::SkipLoader.to_string(), "skip-loader");
        assert_eq!(Marker::Loading.to_string(), "loading");
        assert_eq!(Marker::Hidden.to_string(), "hidden");
        assert_eq!(Marker::Loaded.to_string(), "loaded");
    }

    #[test]
    fn elements_display_as_selectors() {
        assert_eq!(PageElement::Overlay.to_string(), "#pageLoader");
        assert_eq!(PageElement::Content.to_string(), "#pageContent");
        assert_eq!(PageElement::Document.to_string(), "html");
        assert_eq!(PageElement::Body.to_string(), "body");
    }

    #[tokio::test]
    async fn clones_share_markers_and_journal() {
        let surface = RecordingSurface::default();
        let mut handle = surface.clone();

        handle.add_marker(PageElement::Body, Marker::Loading);
        handle.add_marker(PageElement::Content, Marker::Loaded);
        handle.remove_marker(PageElement::Body, Marker::Loading);
        handle.remove_from_layout(PageElement::Overlay);

        assert!(!surface.has_marker(PageElement::Body, Marker::Loading));
        assert_eq!(surface.markers(PageElement::Content), vec![Marker::Loaded]);
        assert!(!surface.in_layout(PageElement::Overlay));
        assert!(surface.in_layout(PageElement::Content));
        assert_eq!(surface.journal().len(), 4);
        assert!(surface
            .first(SurfaceChange::Removed(PageElement::Body, Marker::Loading))
            .is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_late_mounts() {
        let surface = RecordingSurface::with_elements([PageElement::Document, PageElement::Body]);
        let start = Instant::now();
        let (found, _) = tokio::join!(
            wait_for_elements(
                &surface,
                &[PageElement::Overlay, PageElement::Content],
                Duration::from_secs(1)
            ),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                surface.mount(PageElement::Overlay);
                tokio::time::sleep(Duration::from_millis(20)).await;
                surface.mount(PageElement::Content);
            }
        );
        assert!(found);
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(40), "{waited:?}");
        assert!(waited <= Duration::from_millis(45), "{waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_on_elements_that_never_mount() {
        let surface = RecordingSurface::with_elements([PageElement::Overlay]);
        let start = Instant::now();
        let found = wait_for_elements(
            &surface,
            &[PageElement::Overlay, PageElement::Content],
            Duration::from_millis(100),
        )
        .await;
        assert!(!found);
        assert!(start.elapsed() >= Duration::from_millis(100));
        assert!(!surface.contains(PageElement::Content));
    }

    #[test]
    fn missing_elements_are_not_found() {
        let surface = RecordingSurface::with_elements([PageElement::Document, PageElement::Body]);
        assert!(surface.contains(PageElement::Body));
        assert!(!surface.contains(PageElement::Overlay));
        assert!(!surface.contains(PageElement::Content));
    }
}
