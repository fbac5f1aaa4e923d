use glam::Vec2;

use crate::assets::ImageCatalog;
use crate::config::SCREEN_WIDTH;
use crate::draw::{DrawTarget, BLACK, WHITE, YELLOW};
use crate::entity::Body;

const TITLE_TEXT: &str = "PLATFORMER GAME";
const TITLE_Y: f32 = 100.0;
const TITLE_SIZE: f32 = 60.0;
const STATUS_Y: f32 = 500.0;
const LABEL_SIZE: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Start,
    ToggleSound,
    Exit,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Start => "START",
            MenuAction::ToggleSound => "SOUND",
            MenuAction::Exit => "EXIT",
        }
    }

    fn asset(self) -> &'static str {
        match self {
            MenuAction::Start => "btn_start",
            MenuAction::ToggleSound => "btn_sound",
            MenuAction::Exit => "btn_exit",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuButton {
    pub body: Body,
    pub action: MenuAction,
}

/// The three title-screen buttons. Built once and never mutated.
#[derive(Debug, Clone)]
pub struct Menu {
    buttons: Vec<MenuButton>,
}

impl Menu {
    pub fn new(catalog: &dyn ImageCatalog) -> Self {
        let x = SCREEN_WIDTH / 2.0;
        let buttons = [
            (MenuAction::Start, 200.0),
            (MenuAction::ToggleSound, 300.0),
            (MenuAction::Exit, 400.0),
        ]
        .into_iter()
        .map(|(action, y)| MenuButton {
            body: Body::new(x, y, action.asset(), catalog),
            action,
        })
        .collect();
        Self { buttons }
    }

    pub fn buttons(&self) -> &[MenuButton] {
        &self.buttons
    }

    pub fn button(&self, action: MenuAction) -> Option<&MenuButton> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// First button whose box contains `point` (left/top inclusive).
    pub fn hit(&self, point: Vec2) -> Option<MenuAction> {
        self.buttons
            .iter()
            .find(|b| b.body.rect().contains(point))
            .map(|b| b.action)
    }

    pub fn draw(&self, target: &mut dyn DrawTarget, sound_enabled: bool) {
        let x = SCREEN_WIDTH / 2.0;
        target.draw_text(TITLE_TEXT, Vec2::new(x, TITLE_Y), TITLE_SIZE, WHITE);

        let status = if sound_enabled { "ON" } else { "OFF" };
        target.draw_text(
            &format!("Sound is: {status}"),
            Vec2::new(x, STATUS_Y),
            LABEL_SIZE,
            YELLOW,
        );

        for button in &self.buttons {
            target.draw_sprite(&button.body.asset, button.body.rect());
            target.draw_text(button.action.label(), button.body.pos, LABEL_SIZE, BLACK);
        }
    }
}
