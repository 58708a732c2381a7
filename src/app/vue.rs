// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran : historique (petit), affichage (grand), mémoire M, erreur
// - Pavé : chiffres + opérations + fonctions ; chaque clic => une méthode de etat.rs
//
// Note :
// - Le libellé d’un bouton peut différer du symbole envoyé au moteur
//   (𝑦ⁿ n’existe pas dans les polices par défaut d’egui)

use eframe::egui;

use super::etat::{AppCalc, MEMOIRE, RETOUR};
use crate::noyau::operations::*;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice à pile");
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_fonctions(ui);

                ui.add_space(8.0);

                self.ui_pave_numerique(ui);
            });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.monospace(&self.historique);
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.label(egui::RichText::new(&self.affichage).monospace().size(32.0));
                });
                ui.horizontal(|ui| {
                    ui.monospace(format!("{MEMOIRE} = {}", self.memoire));
                });
            });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for (libelle, symbole) in [
                ("√", RACINE),
                ("yⁿ", PUISSANCE),
                ("10ⁿ", PUISSANCE_10),
                ("log", LOG),
                ("cos", COS),
                ("sin", SIN),
                ("±", OPPOSE),
            ] {
                self.bouton_operation(ui, libelle, symbole);
            }
        });

        ui.horizontal_wrapped(|ui| {
            self.bouton_operation(ui, "π", PI_SYMBOLE);
            self.bouton_operation(ui, "e", E_SYMBOLE);
            self.bouton_operation(ui, "RND", ALEATOIRE);

            ui.separator();

            self.bouton_action(ui, MEMOIRE, "Insère la variable M", Action::Variable);
            self.bouton_action(ui, "→M", "Mémorise l’affichage dans M", Action::Memoriser);
            self.bouton_action(ui, "MC", "Remet l’affichage mémoire à 0", Action::EffacerMemoire);

            ui.separator();

            self.bouton_action(ui, "Undo", "Annule la dernière entrée", Action::Annuler);
            self.bouton_operation(ui, "C", EFFACER);
        });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_pile")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_chiffre(ui, "7");
                self.bouton_chiffre(ui, "8");
                self.bouton_chiffre(ui, "9");
                self.bouton_operation(ui, "÷", DIVISE);
                ui.end_row();

                self.bouton_chiffre(ui, "4");
                self.bouton_chiffre(ui, "5");
                self.bouton_chiffre(ui, "6");
                self.bouton_operation(ui, "×", FOIS);
                ui.end_row();

                self.bouton_chiffre(ui, "1");
                self.bouton_chiffre(ui, "2");
                self.bouton_chiffre(ui, "3");
                self.bouton_operation(ui, "−", MOINS);
                ui.end_row();

                self.bouton_chiffre(ui, "0");
                self.bouton_chiffre(ui, ".");
                self.bouton_chiffre(ui, RETOUR);
                self.bouton_operation(ui, "+", PLUS);
                ui.end_row();

                ui.label("");
                ui.label("");
                ui.label("");
                self.bouton_operation(ui, "=", EGAL);
                ui.end_row();
            });
    }

    fn bouton_chiffre(&mut self, ui: &mut egui::Ui, chiffre: &str) {
        if ui.add_sized([56.0, 36.0], egui::Button::new(chiffre)).clicked() {
            self.touche_chiffre(chiffre);
        }
    }

    fn bouton_operation(&mut self, ui: &mut egui::Ui, libelle: &str, symbole: &str) {
        if ui.add_sized([56.0, 36.0], egui::Button::new(libelle)).clicked() {
            self.touche_operation(symbole);
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::Variable => self.inserer_variable(MEMOIRE),
                Action::Memoriser => self.memoriser(label),
                Action::EffacerMemoire => self.effacer_memoire(),
                Action::Annuler => self.annuler(),
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Variable,
    Memoriser,
    EffacerMemoire,
    Annuler,
}
