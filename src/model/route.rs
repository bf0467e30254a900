use super::wallpaper::WallpaperRecord;
use log::debug;

/// Screens the app can show, each with the parameters it needs.
#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    Home,
    Preview { wallpaper: WallpaperRecord },
    Favorites,
    GradientBuilder,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Preview { .. } => "Preview",
            Route::Favorites => "Favorites",
            Route::GradientBuilder => "GradientBuilder",
        }
    }

    fn same_screen(&self, other: &Route) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Stack of routes, always rooted at [`Route::Home`].
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            stack: vec![Route::Home],
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Route {
        // The root is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Shows `route`. If that screen is already on the stack, everything
    /// above it is popped and its params are replaced; otherwise it is pushed.
    pub fn navigate(&mut self, route: Route) {
        if let Some(pos) = self.stack.iter().position(|r| r.same_screen(&route)) {
            self.stack.truncate(pos + 1);
            self.stack[pos] = route;
        } else {
            self.stack.push(route);
        }
        debug!("navigate -> {} (depth {})", self.current().name(), self.depth());
    }

    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            debug!("back -> {} (depth {})", self.current().name(), self.depth());
            true
        } else {
            false
        }
    }
}
