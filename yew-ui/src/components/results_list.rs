use crate::components::ResultCard;
use paraph_shared::NormalizedResult;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResultsListProps {
    pub groups: NormalizedResult,
}

#[function_component(ResultsList)]
pub fn results_list(props: &ResultsListProps) -> Html {
    html! {
        <div class="results" aria-live="polite">
            {for props.groups.iter().map(|group| html! {
                <div class="result-group">
                    {for group.iter().map(|variant| html! {
                        <ResultCard variant={variant.clone()} />
                    })}
                </div>
            })}
        </div>
    }
}
