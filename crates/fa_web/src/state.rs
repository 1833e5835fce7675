use fa_crew::Crew;

pub struct AppState {
    pub crew: Crew,
}

impl AppState {
    pub fn new(crew: Crew) -> Self {
        Self { crew }
    }
}
