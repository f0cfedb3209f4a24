//! Sidebar filters: mode, category, maker(s), year range and trigger.

use leptos::*;

use crate::{ComparisonQuery, DashboardMode, FilterOptions, SingleQuery, MAX_COMPARISON_MAKERS};

/// Current sidebar selection.
#[derive(Clone, Copy)]
pub struct FilterState {
    pub mode: RwSignal<DashboardMode>,
    pub options: RwSignal<Option<FilterOptions>>,
    pub category: RwSignal<Option<String>>,
    pub maker: RwSignal<Option<String>>,
    pub compare: RwSignal<Vec<String>>,
    pub year_from: RwSignal<Option<i32>>,
    pub year_to: RwSignal<Option<i32>>,
    pub include_raw: RwSignal<bool>,
}

impl FilterState {
    pub fn new() -> Self {
        Self {
            mode: create_rw_signal(DashboardMode::Single),
            options: create_rw_signal(None),
            category: create_rw_signal(None),
            maker: create_rw_signal(None),
            compare: create_rw_signal(Vec::new()),
            year_from: create_rw_signal(None),
            year_to: create_rw_signal(None),
            include_raw: create_rw_signal(false),
        }
    }

    /// Reset maker and year selections to the defaults of freshly loaded
    /// options. The category signal is only written when it changes.
    pub fn apply_options(&self, options: FilterOptions) {
        if self.category.get_untracked() != options.category {
            self.category.set(options.category.clone());
        }
        self.maker.set(options.default_maker.clone());
        self.compare.set(options.default_comparison.clone());

        let (from, to) = clamp_years(
            &options.years,
            self.year_from.get_untracked(),
            self.year_to.get_untracked(),
        );
        self.year_from.set(from);
        self.year_to.set(to);
        self.options.set(Some(options));
    }

    pub fn single_query(&self) -> Option<SingleQuery> {
        Some(SingleQuery {
            category: self.category.get_untracked()?,
            maker: self.maker.get_untracked(),
            year_from: self.year_from.get_untracked(),
            year_to: self.year_to.get_untracked(),
            include_raw: self.include_raw.get_untracked(),
        })
    }

    pub fn comparison_query(&self) -> Option<ComparisonQuery> {
        Some(ComparisonQuery {
            category: self.category.get_untracked()?,
            makers: self.compare.get_untracked(),
            year_from: self.year_from.get_untracked(),
            year_to: self.year_to.get_untracked(),
        })
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep a selected year range inside the available years, defaulting to
/// the full span.
pub fn clamp_years(years: &[i32], from: Option<i32>, to: Option<i32>) -> (Option<i32>, Option<i32>) {
    let (Some(&first), Some(&last)) = (years.first(), years.last()) else {
        return (None, None);
    };
    let from = from.filter(|y| (first..=last).contains(y)).unwrap_or(first);
    let to = to.filter(|y| (first..=last).contains(y)).unwrap_or(last);
    if from > to {
        (Some(to), Some(from))
    } else {
        (Some(from), Some(to))
    }
}

/// Toggle a maker in the comparison selection, refusing a sixth one.
pub fn toggle_maker(selected: &mut Vec<String>, maker: &str) {
    if let Some(i) = selected.iter().position(|m| m == maker) {
        selected.remove(i);
    } else if selected.len() < MAX_COMPARISON_MAKERS {
        selected.push(maker.to_string());
    }
}

#[component]
pub fn Sidebar(
    state: FilterState,
    /// Whether a view request is in flight
    loading: ReadSignal<bool>,
    /// Called by the trigger button
    on_trigger: Callback<()>,
) -> impl IntoView {
    let categories = move || state.options.with(|o| o.as_ref().map(|o| o.categories.clone()).unwrap_or_default());
    let makers = move || state.options.with(|o| o.as_ref().map(|o| o.makers.clone()).unwrap_or_default());
    let years = move || state.options.with(|o| o.as_ref().map(|o| o.years.clone()).unwrap_or_default());

    let year_slider = move |value: RwSignal<Option<i32>>, label: &'static str| {
        view! {
            <label class="filter-label">
                {label} ": " <strong>{move || value.get().map(|y| y.to_string()).unwrap_or_default()}</strong>
            </label>
            <input
                type="range"
                class="year-slider"
                min=move || years().first().copied().unwrap_or_default()
                max=move || years().last().copied().unwrap_or_default()
                step="1"
                prop:value=move || value.get().unwrap_or_default()
                on:input=move |ev| {
                    let (from, to) = (state.year_from.get_untracked(), state.year_to.get_untracked());
                    let picked = event_target_value(&ev).parse::<i32>().ok();
                    let (from, to) = if label == "From" {
                        clamp_years(&years(), picked, to)
                    } else {
                        clamp_years(&years(), from, picked)
                    };
                    state.year_from.set(from);
                    state.year_to.set(to);
                }
            />
        }
    };

    view! {
        <aside class="sidebar">
            <h3>"Dashboard Mode"</h3>
            {[DashboardMode::Single, DashboardMode::Comparison]
                .into_iter()
                .map(|mode| view! {
                    <label class="radio">
                        <input
                            type="radio"
                            name="mode"
                            prop:checked=move || state.mode.get() == mode
                            on:change=move |_| state.mode.set(mode)
                        />
                        {mode.label()}
                    </label>
                })
                .collect_view()}

            <h3>"Filters"</h3>
            <label class="filter-label">"Select Vehicle Category"</label>
            <select
                class="filter-select"
                on:change=move |ev| state.category.set(Some(event_target_value(&ev)))
            >
                <For
                    each=categories
                    key=|c| c.clone()
                    children=move |c| {
                        let selected = {
                            let c = c.clone();
                            move || state.category.get().as_deref() == Some(c.as_str())
                        };
                        view! { <option value=c.clone() selected=selected>{c.clone()}</option> }
                    }
                />
            </select>

            <Show
                when=move || state.mode.get() == DashboardMode::Single
                fallback=move || view! {
                    <label class="filter-label">
                        {format!("Select up to {} Manufacturers", MAX_COMPARISON_MAKERS)}
                    </label>
                    <div class="maker-checklist">
                        <For
                            each=makers
                            key=|m| m.clone()
                            children=move |m| {
                                let checked = {
                                    let m = m.clone();
                                    move || state.compare.with(|s| s.contains(&m))
                                };
                                let toggle = {
                                    let m = m.clone();
                                    move |_| state.compare.update(|s| toggle_maker(s, &m))
                                };
                                view! {
                                    <label class="checkbox">
                                        <input type="checkbox" prop:checked=checked on:change=toggle/>
                                        {m.clone()}
                                    </label>
                                }
                            }
                        />
                    </div>
                }
            >
                <label class="filter-label">"Select Maker"</label>
                <select
                    class="filter-select"
                    on:change=move |ev| state.maker.set(Some(event_target_value(&ev)))
                >
                    <For
                        each=makers
                        key=|m| m.clone()
                        children=move |m| {
                            let selected = {
                                let m = m.clone();
                                move || state.maker.get().as_deref() == Some(m.as_str())
                            };
                            view! { <option value=m.clone() selected=selected>{m.clone()}</option> }
                        }
                    />
                </select>
            </Show>

            <div class="year-range">
                {year_slider(state.year_from, "From")}
                {year_slider(state.year_to, "To")}
            </div>

            <button
                class="trigger-button"
                disabled=move || loading.get() || state.category.get().is_none()
                on:click=move |_| on_trigger.call(())
            >
                {move || if loading.get() { "⏳ Loading...".to_string() } else { state.mode.get().action().to_string() }}
            </button>

            <Show when=move || state.mode.get() == DashboardMode::Single fallback=|| ()>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || state.include_raw.get()
                        on:change=move |ev| state.include_raw.set(event_target_checked(&ev))
                    />
                    "Show raw data"
                </label>
            </Show>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_years() {
        let years = [2019, 2020, 2021, 2022];
        assert_eq!(clamp_years(&years, None, None), (Some(2019), Some(2022)));
        assert_eq!(clamp_years(&years, Some(2021), Some(2020)), (Some(2020), Some(2021)));
        assert_eq!(clamp_years(&years, Some(2010), Some(2021)), (Some(2019), Some(2021)));
        assert_eq!(clamp_years(&[], Some(2020), None), (None, None));
    }

    #[test]
    fn test_toggle_maker_limit() {
        let mut selected: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|m| m.to_string()).collect();
        toggle_maker(&mut selected, "F");
        assert_eq!(selected.len(), MAX_COMPARISON_MAKERS);

        toggle_maker(&mut selected, "C");
        toggle_maker(&mut selected, "F");
        assert_eq!(selected, vec!["A", "B", "D", "E", "F"]);
    }
}
